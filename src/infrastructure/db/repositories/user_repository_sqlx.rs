use async_trait::async_trait;

use crate::application::ports::persistence_error::{PersistenceError, PersistenceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::entities::UserEntity;
use crate::domain::entities::user::TABLE;
use crate::infrastructure::db::DbPool;

pub struct SqlxUserRepository {
    pub pool: DbPool,
}

impl SqlxUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn insert(&self, user: &UserEntity) -> PersistenceResult<()> {
        sqlx::query(
            r#"INSERT INTO "user" (user_id, user_password, user_name, user_address, user_tel_number)
               VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(&user.user_id)
        .bind(user.user_password.as_deref())
        .bind(user.user_name.as_deref())
        .bind(user.user_address.as_deref())
        .bind(user.user_tel_number.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| PersistenceError::from_insert(e, TABLE, &user.user_id))?;
        tracing::debug!(user_id = %user.user_id, "user_inserted");
        Ok(())
    }

    async fn save(&self, user: &UserEntity) -> PersistenceResult<()> {
        sqlx::query(
            r#"INSERT INTO "user" (user_id, user_password, user_name, user_address, user_tel_number)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (user_id) DO UPDATE SET
                 user_password = excluded.user_password,
                 user_name = excluded.user_name,
                 user_address = excluded.user_address,
                 user_tel_number = excluded.user_tel_number"#,
        )
        .bind(&user.user_id)
        .bind(user.user_password.as_deref())
        .bind(user.user_name.as_deref())
        .bind(user.user_address.as_deref())
        .bind(user.user_tel_number.as_deref())
        .execute(&self.pool)
        .await?;
        tracing::debug!(user_id = %user.user_id, "user_saved");
        Ok(())
    }

    async fn find_by_id(&self, user_id: &str) -> PersistenceResult<Option<UserEntity>> {
        let row = sqlx::query_as::<_, UserEntity>(
            r#"SELECT user_id, user_password, user_name, user_address, user_tel_number
               FROM "user" WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_all(&self) -> PersistenceResult<Vec<UserEntity>> {
        let rows = sqlx::query_as::<_, UserEntity>(
            r#"SELECT user_id, user_password, user_name, user_address, user_tel_number
               FROM "user" ORDER BY user_id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn delete_by_id(&self, user_id: &str) -> PersistenceResult<bool> {
        let res = sqlx::query(r#"DELETE FROM "user" WHERE user_id = $1"#)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
