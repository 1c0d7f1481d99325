//! Application configuration
//!
//! Loaded from environment variables with the `config` and `dotenvy` crates.
//! Variables use the `CHURCH_HUB` prefix and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use church_hub::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod email;
mod error;
mod payment;
mod server;

pub use auth::AuthConfig;
pub use database::{DatabaseConfig, PoolConfig};
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    /// Hosted OIDC provider.
    pub auth: AuthConfig,

    /// Stripe.
    pub payment: PaymentConfig,

    #[serde(default)]
    pub email: EmailConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `.env` when present, then every `CHURCH_HUB__*` variable:
    ///
    /// - `CHURCH_HUB__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CHURCH_HUB__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required value is missing or unparseable.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHURCH_HUB")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic checks: URL schemes, pool sizes, key prefixes and HTTPS in
    /// production.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.payment.validate()?;
        self.email.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
