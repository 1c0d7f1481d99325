//! PostgreSQL implementation of EventReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::events::Event;
use crate::domain::foundation::{DomainError, EventId, Timestamp};
use crate::ports::EventReader;

pub struct PostgresEventReader {
    pool: PgPool,
}

impl PostgresEventReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(super) const EVENT_COLUMNS: &str =
    "id, title, description, location, starts_at, ends_at, capacity, is_published";

#[derive(Debug, sqlx::FromRow)]
pub(super) struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
    pub is_published: bool,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: EventId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            location: row.location,
            starts_at: Timestamp::from_datetime(row.starts_at),
            ends_at: row.ends_at.map(Timestamp::from_datetime),
            capacity: row.capacity,
            is_published: row.is_published,
        }
    }
}

#[async_trait]
impl EventReader for PostgresEventReader {
    async fn find_published(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        let row: Option<EventRow> = sqlx::query_as(&format!(
            "SELECT {} FROM events WHERE id = $1 AND is_published",
            EVENT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("find event", e))?;

        Ok(row.map(Event::from))
    }

    async fn find(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        let row: Option<EventRow> =
            sqlx::query_as(&format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("find event", e))?;

        Ok(row.map(Event::from))
    }

    async fn list_published(&self) -> Result<Vec<Event>, DomainError> {
        let rows: Vec<EventRow> = sqlx::query_as(&format!(
            "SELECT {} FROM events WHERE is_published ORDER BY starts_at",
            EVENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list events", e))?;

        Ok(rows.into_iter().map(Event::from).collect())
    }
}
