use sqlx::pool::PoolOptions;
use sqlx::{Any, AnyPool};

pub type DbPool = AnyPool;

pub async fn connect_pool(database_url: &str, max_connections: u32) -> anyhow::Result<DbPool> {
    sqlx::any::install_default_drivers();
    let pool = PoolOptions::<Any>::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub mod repositories;
pub mod schema;
