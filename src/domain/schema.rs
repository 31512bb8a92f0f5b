//! Explicit table descriptions handed to the persistence layer at startup.

/// Default length for string columns that do not declare one.
pub const DEFAULT_VARCHAR_LENGTH: u32 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Varchar,
    Integer,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub nullable: bool,
    pub unique: bool,
    pub length: Option<u32>,
    pub primary_key: bool,
}

impl ColumnDef {
    /// Plain nullable column with no constraints.
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            nullable: true,
            unique: false,
            length: None,
            primary_key: false,
        }
    }

    pub const fn id(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub const fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub const fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub const fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    fn sql_type(&self) -> String {
        match self.column_type {
            ColumnType::Varchar => format!(
                "VARCHAR({})",
                self.length.unwrap_or(DEFAULT_VARCHAR_LENGTH)
            ),
            ColumnType::Integer => "INTEGER".to_string(),
            ColumnType::Boolean => "BOOLEAN".to_string(),
        }
    }

    fn sql_definition(&self) -> String {
        let mut def = format!("{} {}", self.name, self.sql_type());
        if !self.nullable {
            def.push_str(" NOT NULL");
        }
        if self.unique {
            def.push_str(" UNIQUE");
        }
        def
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table_name: &'static str,
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    pub fn new(table_name: &'static str, columns: Vec<ColumnDef>) -> Self {
        Self {
            table_name,
            columns,
        }
    }

    pub fn primary_key(&self) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.primary_key)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Renders `CREATE TABLE IF NOT EXISTS` DDL accepted by both Postgres and SQLite.
    /// The table name is always quoted since `user` is reserved in Postgres.
    pub fn create_table_sql(&self) -> String {
        let mut parts: Vec<String> = self.columns.iter().map(|c| c.sql_definition()).collect();
        let keys: Vec<&str> = self
            .columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name)
            .collect();
        if !keys.is_empty() {
            parts.push(format!("PRIMARY KEY ({})", keys.join(", ")));
        }
        format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" ({})",
            self.table_name,
            parts.join(", ")
        )
    }
}

/// A record that maps one-to-one onto a row of a table.
pub trait Entity: Send + Sync + Unpin + 'static {
    type Id: Send + Sync + ToString + 'static;

    fn table_name() -> &'static str;
    fn id_column() -> &'static str;
    fn table_schema() -> TableSchema;
    fn id(&self) -> &Self::Id;
}
