use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("duplicate key {key:?} in table {table}")]
    Duplicate { table: &'static str, key: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    /// Maps driver unique-violation errors onto `Duplicate`, passing everything else through.
    pub fn from_insert(err: sqlx::Error, table: &'static str, key: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Duplicate {
                table,
                key: key.to_string(),
            },
            _ => Self::Database(err),
        }
    }
}
