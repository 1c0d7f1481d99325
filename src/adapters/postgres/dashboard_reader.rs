//! PostgreSQL implementation of DashboardReader.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::domain::people::LEAD_STATUS_NEW;
use crate::ports::{AdminSummary, DashboardReader};

pub struct PostgresDashboardReader {
    pool: PgPool,
}

impl PostgresDashboardReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardReader for PostgresDashboardReader {
    async fn admin_summary(&self) -> Result<AdminSummary, DomainError> {
        let (sermons, events, new_leads): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM sermons),
                (SELECT COUNT(*) FROM events),
                (SELECT COUNT(*) FROM leads WHERE status = $1)
            "#,
        )
        .bind(LEAD_STATUS_NEW)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("admin summary", e))?;

        Ok(AdminSummary {
            sermons,
            events,
            new_leads,
        })
    }
}
