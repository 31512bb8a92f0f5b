use crate::domain::entities::{SampleTable1Entity, UserEntity};
use crate::domain::schema::{Entity, TableSchema};
use crate::infrastructure::db::DbPool;

/// Every table this service owns, in creation order.
pub fn entity_schemas() -> Vec<TableSchema> {
    vec![SampleTable1Entity::table_schema(), UserEntity::table_schema()]
}

pub async fn register(pool: &DbPool, schema: &TableSchema) -> anyhow::Result<()> {
    let ddl = schema.create_table_sql();
    tracing::debug!(table = schema.table_name, %ddl, "registering_table");
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

pub async fn register_all(pool: &DbPool) -> anyhow::Result<()> {
    for schema in entity_schemas() {
        register(pool, &schema).await?;
        tracing::info!(table = schema.table_name, "table_registered");
    }
    Ok(())
}
