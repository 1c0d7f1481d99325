//! PostgreSQL implementation of SettingsRepository (JSONB key/value).

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::ports::SettingsRepository;

pub struct PostgresSettingsRepository {
    pool: PgPool,
}

impl PostgresSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepository {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DomainError> {
        let value: Option<Json<serde_json::Value>> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("read setting", e))?;

        Ok(value.map(|Json(v)| v))
    }

    async fn put(&self, key: &str, value: &serde_json::Value) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = now()
            "#,
        )
        .bind(key)
        .bind(Json(value))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("write setting", e))?;

        Ok(())
    }
}
