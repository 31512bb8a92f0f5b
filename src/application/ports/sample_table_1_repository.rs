use async_trait::async_trait;

use crate::application::ports::persistence_error::PersistenceResult;
use crate::domain::entities::SampleTable1Entity;

#[async_trait]
pub trait SampleTable1Repository: Send + Sync {
    /// Fails with `PersistenceError::Duplicate` when the key already exists.
    async fn insert(&self, entity: &SampleTable1Entity) -> PersistenceResult<()>;
    async fn save(&self, entity: &SampleTable1Entity) -> PersistenceResult<()>;
    async fn find_by_id(&self, pk_column: &str) -> PersistenceResult<Option<SampleTable1Entity>>;
    async fn exists_by_id(&self, pk_column: &str) -> PersistenceResult<bool>;
    async fn find_all(&self) -> PersistenceResult<Vec<SampleTable1Entity>>;
    async fn delete_by_id(&self, pk_column: &str) -> PersistenceResult<bool>;
}
