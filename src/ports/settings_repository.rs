//! Key/value site settings stored as JSON.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError>;

    /// Insert or replace the value under `key`.
    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<(), DomainError>;
}
