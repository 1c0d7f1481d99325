//! Listener, logging and public site settings.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Per-request timeout, 1 to 300 seconds.
    pub request_timeout_secs: u64,

    /// Comma-separated allowed origins. Empty allows any.
    pub cors_origins: Option<String>,

    /// Public site base URL. Checkout success and cancel links hang off it.
    pub site_url: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,church_hub=debug,sqlx=warn".to_string(),
            request_timeout_secs: 30,
            cors_origins: None,
            site_url: "http://localhost:3000".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidBindAddress)
    }

    /// Site URL without a trailing slash.
    pub fn site_base_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = &self.cors_origins else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=300).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(self.site_url.starts_with("https://") || self.site_url.starts_with("http://")) {
            return Err(ValidationError::InvalidSiteUrl);
        }
        self.socket_addr().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_every_interface_in_development() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unparseable_host_fails_validation() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidBindAddress)
        ));
    }

    #[test]
    fn site_url_must_be_http() {
        let config = ServerConfig {
            site_url: "church.example.org".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidSiteUrl)));

        let config = ServerConfig {
            site_url: "https://church.example.org/".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.site_base_url(), "https://church.example.org");
    }

    #[test]
    fn cors_list_skips_blank_entries() {
        let config = ServerConfig {
            cors_origins: Some("https://church.example.org, ,http://localhost:3000".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.cors_origins_list(),
            vec!["https://church.example.org", "http://localhost:3000"]
        );
        assert!(ServerConfig::default().cors_origins_list().is_empty());
    }

    #[test]
    fn port_and_timeout_bounds() {
        for config in [
            ServerConfig { port: 0, ..Default::default() },
            ServerConfig { request_timeout_secs: 0, ..Default::default() },
            ServerConfig { request_timeout_secs: 301, ..Default::default() },
        ] {
            assert!(config.validate().is_err());
        }
        let config = ServerConfig { request_timeout_secs: 300, ..Default::default() };
        assert_eq!(config.request_timeout(), Duration::from_secs(300));
    }
}
