use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::schema::{ColumnDef, ColumnType, Entity, TableSchema};

pub const TABLE: &str = "sample_table_1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SampleTable1Entity {
    pub pk_column: String,
    pub sample_column1: Option<i32>,
    pub sample_column2: Option<bool>,
}

impl SampleTable1Entity {
    pub fn new(
        pk_column: impl Into<String>,
        sample_column1: Option<i32>,
        sample_column2: Option<bool>,
    ) -> Self {
        Self {
            pk_column: pk_column.into(),
            sample_column1,
            sample_column2,
        }
    }

    /// Abbreviated form; `sample_column2` stays unset.
    pub fn with_column1(pk_column: impl Into<String>, sample_column1: Option<i32>) -> Self {
        Self::new(pk_column, sample_column1, None)
    }
}

impl Entity for SampleTable1Entity {
    type Id = String;

    fn table_name() -> &'static str {
        TABLE
    }

    fn id_column() -> &'static str {
        "pk_column"
    }

    fn table_schema() -> TableSchema {
        TableSchema::new(
            TABLE,
            vec![
                ColumnDef::new("pk_column", ColumnType::Varchar)
                    .id()
                    .unique(true)
                    .length(20),
                ColumnDef::new("sample_column1", ColumnType::Integer),
                ColumnDef::new("sample_column2", ColumnType::Boolean),
            ],
        )
    }

    fn id(&self) -> &String {
        &self.pk_column
    }
}
