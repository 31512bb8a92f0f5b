use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::{FromRow, Row};

use crate::application::ports::persistence_error::{PersistenceError, PersistenceResult};
use crate::application::ports::sample_table_1_repository::SampleTable1Repository;
use crate::domain::entities::SampleTable1Entity;
use crate::domain::entities::sample_table_1::TABLE;
use crate::infrastructure::db::DbPool;

// The Any driver cannot carry SQLite's BOOLEAN, so reads cast the flag to an
// integer and map it back here.
const SELECT_COLUMNS: &str =
    "pk_column, sample_column1, CAST(sample_column2 AS INTEGER) AS sample_column2";

impl<'r> FromRow<'r, AnyRow> for SampleTable1Entity {
    fn from_row(row: &'r AnyRow) -> Result<Self, sqlx::Error> {
        let flag: Option<i32> = row.try_get("sample_column2")?;
        Ok(Self {
            pk_column: row.try_get("pk_column")?,
            sample_column1: row.try_get("sample_column1")?,
            sample_column2: flag.map(|v| v != 0),
        })
    }
}

pub struct SqlxSampleTable1Repository {
    pub pool: DbPool,
}

impl SqlxSampleTable1Repository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SampleTable1Repository for SqlxSampleTable1Repository {
    async fn insert(&self, entity: &SampleTable1Entity) -> PersistenceResult<()> {
        sqlx::query(
            r#"INSERT INTO "sample_table_1" (pk_column, sample_column1, sample_column2)
               VALUES ($1, $2, $3)"#,
        )
        .bind(&entity.pk_column)
        .bind(entity.sample_column1)
        .bind(entity.sample_column2)
        .execute(&self.pool)
        .await
        .map_err(|e| PersistenceError::from_insert(e, TABLE, &entity.pk_column))?;
        tracing::debug!(pk = %entity.pk_column, "sample_table_1_inserted");
        Ok(())
    }

    async fn save(&self, entity: &SampleTable1Entity) -> PersistenceResult<()> {
        sqlx::query(
            r#"INSERT INTO "sample_table_1" (pk_column, sample_column1, sample_column2)
               VALUES ($1, $2, $3)
               ON CONFLICT (pk_column) DO UPDATE SET
                 sample_column1 = excluded.sample_column1,
                 sample_column2 = excluded.sample_column2"#,
        )
        .bind(&entity.pk_column)
        .bind(entity.sample_column1)
        .bind(entity.sample_column2)
        .execute(&self.pool)
        .await?;
        tracing::debug!(pk = %entity.pk_column, "sample_table_1_saved");
        Ok(())
    }

    async fn find_by_id(&self, pk_column: &str) -> PersistenceResult<Option<SampleTable1Entity>> {
        let sql = format!(r#"SELECT {SELECT_COLUMNS} FROM "sample_table_1" WHERE pk_column = $1"#);
        let row = sqlx::query_as::<_, SampleTable1Entity>(&sql)
            .bind(pk_column)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn exists_by_id(&self, pk_column: &str) -> PersistenceResult<bool> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM "sample_table_1" WHERE pk_column = $1"#)
                .bind(pk_column)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    async fn find_all(&self) -> PersistenceResult<Vec<SampleTable1Entity>> {
        let sql = format!(r#"SELECT {SELECT_COLUMNS} FROM "sample_table_1" ORDER BY pk_column"#);
        let rows = sqlx::query_as::<_, SampleTable1Entity>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn delete_by_id(&self, pk_column: &str) -> PersistenceResult<bool> {
        let res = sqlx::query(r#"DELETE FROM "sample_table_1" WHERE pk_column = $1"#)
            .bind(pk_column)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
