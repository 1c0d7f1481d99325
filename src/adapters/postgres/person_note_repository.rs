//! PostgreSQL implementation of PersonNoteRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, NoteId, Timestamp, UserId};
use crate::domain::people::PersonNote;
use crate::ports::PersonNoteRepository;

use super::parse_user_id;

pub struct PostgresPersonNoteRepository {
    pool: PgPool,
}

impl PostgresPersonNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PersonNoteRow {
    id: Uuid,
    profile_user_id: String,
    note: String,
    created_by: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PersonNoteRow> for PersonNote {
    type Error = DomainError;

    fn try_from(row: PersonNoteRow) -> Result<Self, Self::Error> {
        Ok(PersonNote {
            id: NoteId::from_uuid(row.id),
            profile_user_id: parse_user_id(row.profile_user_id)?,
            note: row.note,
            created_by: parse_user_id(row.created_by)?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl PersonNoteRepository for PostgresPersonNoteRepository {
    async fn list_for(&self, user_id: &UserId) -> Result<Vec<PersonNote>, DomainError> {
        let rows: Vec<PersonNoteRow> = sqlx::query_as(
            r#"
            SELECT id, profile_user_id, note, created_by, created_at
            FROM person_notes
            WHERE profile_user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list notes", e))?;

        rows.into_iter().map(PersonNote::try_from).collect()
    }

    async fn insert(&self, note: &PersonNote) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO person_notes (id, profile_user_id, note, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(note.id.as_uuid())
        .bind(note.profile_user_id.as_str())
        .bind(&note.note)
        .bind(note.created_by.as_str())
        .bind(note.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("insert note", e))?;

        Ok(())
    }
}
