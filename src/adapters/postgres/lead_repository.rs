//! PostgreSQL implementation of LeadRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::domain::people::Lead;
use crate::ports::LeadRepository;

pub struct PostgresLeadRepository {
    pool: PgPool,
}

impl PostgresLeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadRepository for PostgresLeadRepository {
    async fn insert(&self, lead: &Lead) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO leads (id, full_name, email, phone, consent, status, tags, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(lead.id.as_uuid())
        .bind(&lead.full_name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(lead.consent)
        .bind(&lead.status)
        .bind(&lead.tags)
        .bind(lead.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("insert lead", e))?;

        Ok(())
    }
}
