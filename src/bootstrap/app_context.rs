use std::sync::Arc;

use crate::application::ports::sample_table_1_repository::SampleTable1Repository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::repositories::sample_table_1_repository_sqlx::SqlxSampleTable1Repository;
use crate::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;
use crate::presentation::http::security::SecurityFilterChain;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    pool: DbPool,
    security: Arc<SecurityFilterChain>,
    sample_table_1_repo: Arc<dyn SampleTable1Repository>,
    user_repo: Arc<dyn UserRepository>,
}

impl AppServices {
    pub fn new(
        pool: DbPool,
        security: SecurityFilterChain,
        sample_table_1_repo: Arc<dyn SampleTable1Repository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            pool,
            security: Arc::new(security),
            sample_table_1_repo,
            user_repo,
        }
    }

    /// Wires the sqlx repositories onto one pool.
    pub fn with_sqlx(pool: DbPool, security: SecurityFilterChain) -> Self {
        let sample_table_1_repo = Arc::new(SqlxSampleTable1Repository::new(pool.clone()));
        let user_repo = Arc::new(SqlxUserRepository::new(pool.clone()));
        Self::new(pool, security, sample_table_1_repo, user_repo)
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn pool(&self) -> DbPool {
        self.services.pool.clone()
    }

    pub fn security(&self) -> Arc<SecurityFilterChain> {
        self.services.security.clone()
    }

    pub fn sample_table_1_repo(&self) -> Arc<dyn SampleTable1Repository> {
        self.services.sample_table_1_repo.clone()
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }
}
