use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{PasswordHasher, TokenService};
use crate::config::AppConfig;
use crate::database::{ModelRegistry, Repository};

/// Everything a handler needs, built once in `main` and shared read-only.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
    pub registry: Arc<ModelRegistry>,
    pub tokens: TokenService,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let tokens = TokenService::from_config(&config.security);
        let hasher = PasswordHasher::new(config.security.bcrypt_cost);
        Self {
            config: Arc::new(config),
            pool,
            registry: Arc::new(ModelRegistry::new()),
            tokens,
            hasher,
        }
    }

    pub fn repository(&self) -> Repository {
        Repository::new(self.pool.clone(), self.hasher)
    }
}
