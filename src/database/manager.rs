use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::{AppConfig, ConfigError};

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("{0}")]
    NotFound(String),

    /// A write was refused by the model layer or the store and rolled back.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    pub fn rejected(err: impl std::fmt::Display) -> Self {
        DatabaseError::Rejected(err.to_string())
    }
}

/// Builds the connection pool shared by every request
pub struct DatabaseManager;

impl DatabaseManager {
    fn options(config: &AppConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .acquire_timeout(Duration::from_secs(config.database.connection_timeout))
    }

    /// Connect eagerly, failing at startup when the database is unreachable
    pub async fn connect(config: &AppConfig) -> Result<PgPool, DatabaseError> {
        let url = config.database_url()?;
        let pool = Self::options(config).connect(url).await?;
        info!(
            max_connections = config.database.max_connections,
            "Created database pool"
        );
        Ok(pool)
    }

    /// Build a pool that connects on first use
    pub fn connect_lazy(config: &AppConfig) -> Result<PgPool, DatabaseError> {
        let url = config.database_url()?;
        Ok(Self::options(config).connect_lazy(url)?)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Quote SQL identifier to prevent injection
    pub fn quote_identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}
