//! PostgreSQL implementation of SermonReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::content::Sermon;
use crate::domain::foundation::{DomainError, SermonId, Timestamp};
use crate::ports::SermonReader;

const SERMON_COLUMNS: &str =
    "id, title, speaker, series, youtube_url, preached_at, notes_md, tags, is_published";

pub struct PostgresSermonReader {
    pool: PgPool,
}

impl PostgresSermonReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SermonRow {
    id: Uuid,
    title: String,
    speaker: Option<String>,
    series: Option<String>,
    youtube_url: Option<String>,
    preached_at: Option<DateTime<Utc>>,
    notes_md: Option<String>,
    tags: Vec<String>,
    is_published: bool,
}

impl From<SermonRow> for Sermon {
    fn from(row: SermonRow) -> Self {
        Sermon {
            id: SermonId::from_uuid(row.id),
            title: row.title,
            speaker: row.speaker,
            series: row.series,
            youtube_url: row.youtube_url,
            preached_at: row.preached_at.map(Timestamp::from_datetime),
            notes_md: row.notes_md,
            tags: row.tags,
            is_published: row.is_published,
        }
    }
}

#[async_trait]
impl SermonReader for PostgresSermonReader {
    async fn list_published(&self) -> Result<Vec<Sermon>, DomainError> {
        let rows: Vec<SermonRow> = sqlx::query_as(&format!(
            "SELECT {} FROM sermons WHERE is_published ORDER BY preached_at DESC NULLS LAST",
            SERMON_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list sermons", e))?;

        Ok(rows.into_iter().map(Sermon::from).collect())
    }

    async fn find_published(&self, id: &SermonId) -> Result<Option<Sermon>, DomainError> {
        let row: Option<SermonRow> = sqlx::query_as(&format!(
            "SELECT {} FROM sermons WHERE id = $1 AND is_published",
            SERMON_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("find sermon", e))?;

        Ok(row.map(Sermon::from))
    }
}
