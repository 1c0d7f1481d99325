//! Church Hub server binary.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use church_hub::adapters::auth::{OidcConfig, OidcSessionValidator};
use church_hub::adapters::email::{ConsoleEmailNotifier, ResendConfig, ResendEmailNotifier};
use church_hub::adapters::http::{api_router, AppState, HttpSettings};
use church_hub::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use church_hub::application::handlers::giving::CheckoutSettings;
use church_hub::config::{AppConfig, ConfigError, ValidationError};
use church_hub::domain::foundation::AuthError;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Auth: {0}")]
    Auth(#[from] AuthError),

    #[error("Server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let pool = config.database.pool_options().connect(&config.database.url).await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let payment = &config.payment;
    if payment.stripe_webhook_secret.is_none() {
        tracing::warn!("No Stripe webhook secret configured; webhooks will be refused");
    }
    let payment_provider = Arc::new(StripePaymentAdapter::new(
        StripeConfig::new(&payment.stripe_api_key, payment.stripe_webhook_secret.clone())
            .with_require_livemode(payment.require_livemode),
    ));

    let session_validator = Arc::new(OidcSessionValidator::new(
        OidcConfig::new(&config.auth.issuer_url, &config.auth.audience)
            .with_cache_ttl(config.auth.jwks_cache_ttl()),
    )?);

    let checkout = CheckoutSettings::new(config.server.site_base_url(), &payment.currency);

    let state = match &config.email.resend_api_key {
        Some(key) => AppState::postgres(
            pool,
            Arc::new(ResendEmailNotifier::new(ResendConfig::new(
                key,
                config.email.from_header(),
            ))),
            payment_provider,
            session_validator,
            checkout,
        ),
        None => {
            tracing::info!("No Resend key configured; emails go to the log");
            AppState::postgres(
                pool,
                Arc::new(ConsoleEmailNotifier::new()),
                payment_provider,
                session_validator,
                checkout,
            )
        }
    };

    let settings = HttpSettings {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
    };
    let app = api_router(state, &settings);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Church Hub listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
