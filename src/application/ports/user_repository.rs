use async_trait::async_trait;

use crate::application::ports::persistence_error::PersistenceResult;
use crate::domain::entities::UserEntity;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: &UserEntity) -> PersistenceResult<()>;
    async fn save(&self, user: &UserEntity) -> PersistenceResult<()>;
    async fn find_by_id(&self, user_id: &str) -> PersistenceResult<Option<UserEntity>>;
    async fn find_all(&self) -> PersistenceResult<Vec<UserEntity>>;
    async fn delete_by_id(&self, user_id: &str) -> PersistenceResult<bool>;
}
