use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::schema::{ColumnDef, ColumnType, Entity, TableSchema};

pub const TABLE: &str = "user";

// Passwords are stored exactly as given; nothing hashes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct UserEntity {
    pub user_id: String,
    pub user_password: Option<String>,
    pub user_name: Option<String>,
    pub user_address: Option<String>,
    pub user_tel_number: Option<String>,
}

impl UserEntity {
    pub fn new(
        user_id: impl Into<String>,
        user_password: Option<String>,
        user_name: Option<String>,
        user_address: Option<String>,
        user_tel_number: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_password,
            user_name,
            user_address,
            user_tel_number,
        }
    }
}

impl Entity for UserEntity {
    type Id = String;

    fn table_name() -> &'static str {
        TABLE
    }

    fn id_column() -> &'static str {
        "user_id"
    }

    fn table_schema() -> TableSchema {
        TableSchema::new(
            TABLE,
            vec![
                ColumnDef::new("user_id", ColumnType::Varchar).id(),
                ColumnDef::new("user_password", ColumnType::Varchar),
                ColumnDef::new("user_name", ColumnType::Varchar),
                ColumnDef::new("user_address", ColumnType::Varchar),
                ColumnDef::new("user_tel_number", ColumnType::Varchar),
            ],
        )
    }

    fn id(&self) -> &String {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_id_is_constrained() {
        let schema = UserEntity::table_schema();
        assert_eq!(schema.columns.len(), 5);
        for col in &schema.columns {
            assert_eq!(col.primary_key, col.name == "user_id");
            assert!(!col.unique);
            assert_eq!(col.length, None);
        }
        assert!(schema.create_table_sql().starts_with("CREATE TABLE IF NOT EXISTS \"user\""));
    }
}
