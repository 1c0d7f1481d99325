//! PostgreSQL settings.
//!
//! `CHURCH_HUB__DATABASE__URL` is the only required value. Pool tuning lives
//! under `CHURCH_HUB__DATABASE__POOL__*`.

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use super::error::ValidationError;

const MAX_POOL: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    /// Apply `migrations/` before serving.
    #[serde(default)]
    pub run_migrations: bool,

    #[serde(default)]
    pub pool: PoolConfig,
}

/// Connection pool sizing and timeouts, all in seconds.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PoolConfig {
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_connections: 1,
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

impl DatabaseConfig {
    pub fn pool_options(&self) -> PgPoolOptions {
        let pool = &self.pool;
        PgPoolOptions::new()
            .min_connections(pool.min_connections)
            .max_connections(pool.max_connections)
            .acquire_timeout(Duration::from_secs(pool.acquire_timeout_secs))
            .idle_timeout(Some(Duration::from_secs(pool.idle_timeout_secs)))
            .max_lifetime(Some(Duration::from_secs(pool.max_lifetime_secs)))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE_URL"));
        }
        let scheme_ok = ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme));
        if !scheme_ok {
            return Err(ValidationError::InvalidDatabaseUrl);
        }

        match (self.pool.min_connections, self.pool.max_connections) {
            (min, max) if min > max => Err(ValidationError::InvalidPoolSize),
            (_, max) if max > MAX_POOL => Err(ValidationError::PoolSizeTooLarge),
            _ => Ok(()),
        }
    }
}
