//! PostgreSQL implementation of RegistrationRepository.
//!
//! `(event_id, user_id)` is unique in the schema, so a racing duplicate
//! sign-up surfaces as a constraint violation that `insert` reports as
//! `RegistrationInsert::Duplicate`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::events::{
    CheckInRecord, CheckInToken, Event, Registration, RegistrationStatus,
};
use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, RegistrationId, Timestamp, UserId,
};
use crate::ports::{RegistrationInsert, RegistrationRepository, UpcomingRegistration};

use super::event_reader::EventRow;
use super::parse_user_id;

const EVENT_USER_CONSTRAINT: &str = "registrations_event_id_user_id_key";
const EVENT_TOKEN_CONSTRAINT: &str = "registrations_event_id_check_in_token_key";

const REGISTRATION_COLUMNS: &str =
    "id, event_id, user_id, status, check_in_token, checked_in_at, created_at";

pub struct PostgresRegistrationRepository {
    pool: PgPool,
}

impl PostgresRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RegistrationRow {
    id: Uuid,
    event_id: Uuid,
    user_id: String,
    status: String,
    check_in_token: Option<String>,
    checked_in_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = DomainError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        let status = RegistrationStatus::parse(&row.status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid registration status: {}", row.status),
            )
        })?;

        Ok(Registration {
            id: RegistrationId::from_uuid(row.id),
            event_id: EventId::from_uuid(row.event_id),
            user_id: parse_user_id(row.user_id)?,
            status,
            check_in_token: row.check_in_token.as_deref().and_then(CheckInToken::parse),
            checked_in_at: row.checked_in_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CheckInRow {
    id: Uuid,
    user_id: String,
    full_name: Option<String>,
    checked_in_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct UpcomingRow {
    #[sqlx(flatten)]
    registration: RegistrationRow,
    event_title: String,
    event_description: Option<String>,
    event_location: Option<String>,
    event_starts_at: DateTime<Utc>,
    event_ends_at: Option<DateTime<Utc>>,
    event_capacity: Option<i32>,
    event_is_published: bool,
}

impl TryFrom<UpcomingRow> for UpcomingRegistration {
    type Error = DomainError;

    fn try_from(row: UpcomingRow) -> Result<Self, Self::Error> {
        let event = Event::from(EventRow {
            id: row.registration.event_id,
            title: row.event_title,
            description: row.event_description,
            location: row.event_location,
            starts_at: row.event_starts_at,
            ends_at: row.event_ends_at,
            capacity: row.event_capacity,
            is_published: row.event_is_published,
        });
        Ok(UpcomingRegistration {
            registration: Registration::try_from(row.registration)?,
            event,
        })
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn count_for_event(&self, event_id: &EventId) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM registrations WHERE event_id = $1")
            .bind(event_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("count registrations", e))
    }

    async fn find_for(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<Option<Registration>, DomainError> {
        let row: Option<RegistrationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM registrations WHERE event_id = $1 AND user_id = $2",
            REGISTRATION_COLUMNS
        ))
        .bind(event_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("find registration", e))?;

        row.map(Registration::try_from).transpose()
    }

    async fn find(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError> {
        let row: Option<RegistrationRow> = sqlx::query_as(&format!(
            "SELECT {} FROM registrations WHERE id = $1",
            REGISTRATION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("find registration", e))?;

        row.map(Registration::try_from).transpose()
    }

    async fn insert(&self, registration: &Registration) -> Result<RegistrationInsert, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO registrations (id, event_id, user_id, status, check_in_token, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(registration.id.as_uuid())
        .bind(registration.event_id.as_uuid())
        .bind(registration.user_id.as_str())
        .bind(registration.status.as_str())
        .bind(registration.check_in_token.as_ref().map(|t| t.as_str()))
        .bind(registration.created_at.as_datetime())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(RegistrationInsert::Inserted),
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some(EVENT_USER_CONSTRAINT) =>
            {
                Ok(RegistrationInsert::Duplicate)
            }
            Err(e) => Err(DomainError::database("insert registration", e)),
        }
    }

    async fn check_in_by_token(
        &self,
        event_id: &EventId,
        token: &CheckInToken,
        at: Timestamp,
    ) -> Result<Option<Registration>, DomainError> {
        let row: Option<RegistrationRow> = sqlx::query_as(&format!(
            r#"
            UPDATE registrations SET status = $3, checked_in_at = $4
            WHERE event_id = $1 AND check_in_token = $2
            RETURNING {}
            "#,
            REGISTRATION_COLUMNS
        ))
        .bind(event_id.as_uuid())
        .bind(token.as_str())
        .bind(RegistrationStatus::CheckedIn.as_str())
        .bind(at.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("check in", e))?;

        row.map(Registration::try_from).transpose()
    }

    async fn recent_check_ins(
        &self,
        event_id: &EventId,
        limit: i64,
    ) -> Result<Vec<CheckInRecord>, DomainError> {
        let rows: Vec<CheckInRow> = sqlx::query_as(
            r#"
            SELECT r.id, r.user_id, p.full_name, r.checked_in_at
            FROM registrations r
            LEFT JOIN profiles p ON p.user_id = r.user_id
            WHERE r.event_id = $1 AND r.checked_in_at IS NOT NULL
            ORDER BY r.checked_in_at DESC
            LIMIT $2
            "#,
        )
        .bind(event_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list check-ins", e))?;

        rows.into_iter()
            .map(|row| {
                Ok::<_, DomainError>(CheckInRecord {
                    registration_id: RegistrationId::from_uuid(row.id),
                    user_id: parse_user_id(row.user_id)?,
                    full_name: row.full_name,
                    checked_in_at: Timestamp::from_datetime(row.checked_in_at),
                })
            })
            .collect()
    }

    async fn assign_token(
        &self,
        id: &RegistrationId,
        token: &CheckInToken,
    ) -> Result<Option<Registration>, DomainError> {
        let row: Option<RegistrationRow> = sqlx::query_as(&format!(
            "UPDATE registrations SET check_in_token = $2 WHERE id = $1 RETURNING {}",
            REGISTRATION_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(EVENT_TOKEN_CONSTRAINT) {
                    return DomainError::new(
                        ErrorCode::UniqueViolation,
                        "Check-in token already in use for this event",
                    );
                }
            }
            DomainError::database("assign token", e)
        })?;

        row.map(Registration::try_from).transpose()
    }

    async fn list_upcoming_for_user(
        &self,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<Vec<UpcomingRegistration>, DomainError> {
        let rows: Vec<UpcomingRow> = sqlx::query_as(
            r#"
            SELECT r.id, r.event_id, r.user_id, r.status, r.check_in_token,
                   r.checked_in_at, r.created_at,
                   e.title AS event_title,
                   e.description AS event_description,
                   e.location AS event_location,
                   e.starts_at AS event_starts_at,
                   e.ends_at AS event_ends_at,
                   e.capacity AS event_capacity,
                   e.is_published AS event_is_published
            FROM registrations r
            JOIN events e ON e.id = r.event_id
            WHERE r.user_id = $1 AND e.starts_at >= $2
            ORDER BY e.starts_at
            "#,
        )
        .bind(user_id.as_str())
        .bind(now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list registrations", e))?;

        rows.into_iter().map(UpcomingRegistration::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, token: Option<&str>) -> RegistrationRow {
        RegistrationRow {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            status: status.to_string(),
            check_in_token: token.map(str::to_string),
            checked_in_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn blank_stored_token_reads_as_none() {
        let registration = Registration::try_from(row("REGISTERED", Some("  "))).unwrap();
        assert!(registration.check_in_token.is_none());
    }

    #[test]
    fn checked_in_status_round_trips() {
        let registration = Registration::try_from(row("CHECKED_IN", Some("abc"))).unwrap();
        assert_eq!(registration.status, RegistrationStatus::CheckedIn);
        assert_eq!(registration.check_in_token.unwrap().as_str(), "abc");
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(Registration::try_from(row("WAITLISTED", None)).is_err());
    }
}
