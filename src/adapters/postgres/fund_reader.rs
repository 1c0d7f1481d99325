//! PostgreSQL implementation of FundReader.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, FundId};
use crate::domain::giving::Fund;
use crate::ports::FundReader;

pub struct PostgresFundReader {
    pool: PgPool,
}

impl PostgresFundReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FundRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    is_active: bool,
}

impl From<FundRow> for Fund {
    fn from(row: FundRow) -> Self {
        Fund {
            id: FundId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            is_active: row.is_active,
        }
    }
}

#[async_trait]
impl FundReader for PostgresFundReader {
    async fn find_active(&self, id: &FundId) -> Result<Option<Fund>, DomainError> {
        let row: Option<FundRow> = sqlx::query_as(
            "SELECT id, name, description, is_active FROM funds WHERE id = $1 AND is_active",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("find fund", e))?;

        Ok(row.map(Fund::from))
    }

    async fn find(&self, id: &FundId) -> Result<Option<Fund>, DomainError> {
        let row: Option<FundRow> =
            sqlx::query_as("SELECT id, name, description, is_active FROM funds WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("find fund", e))?;

        Ok(row.map(Fund::from))
    }

    async fn list_active(&self) -> Result<Vec<Fund>, DomainError> {
        let rows: Vec<FundRow> = sqlx::query_as(
            "SELECT id, name, description, is_active FROM funds WHERE is_active ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list funds", e))?;

        Ok(rows.into_iter().map(Fund::from).collect())
    }
}
