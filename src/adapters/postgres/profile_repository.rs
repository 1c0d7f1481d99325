//! PostgreSQL implementation of ProfileRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::access::Role;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::people::{AddressSnapshot, PeopleFilter, PersonStatus, Profile};
use crate::ports::ProfileRepository;

use super::parse_user_id;

pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PROFILE_COLUMNS: &str = "user_id, email, full_name, phone, address_line1, city, postcode, \
     role, status, tags, created_at";

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    user_id: String,
    email: Option<String>,
    full_name: Option<String>,
    phone: Option<String>,
    address_line1: Option<String>,
    city: Option<String>,
    postcode: Option<String>,
    role: Option<String>,
    status: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let status = PersonStatus::parse_filter(&row.status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid person status: {}", row.status),
            )
        })?;

        Ok(Profile {
            user_id: parse_user_id(row.user_id)?,
            email: row.email,
            full_name: row.full_name,
            phone: row.phone,
            address_line1: row.address_line1,
            city: row.city,
            postcode: row.postcode,
            // Unknown roles read back as the lowest privilege.
            role: Role::normalize(row.role.as_deref()),
            status,
            tags: row.tags,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(&format!(
            "SELECT {} FROM profiles WHERE user_id = $1",
            PROFILE_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("find profile", e))?;

        row.map(Profile::try_from).transpose()
    }

    async fn insert_if_absent(&self, profile: &Profile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, email, role, status, tags, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(profile.user_id.as_str())
        .bind(&profile.email)
        .bind(profile.role.as_str())
        .bind(profile.status.as_str())
        .bind(&profile.tags)
        .bind(profile.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("insert profile", e))?;

        Ok(())
    }

    async fn update_address(
        &self,
        user_id: &UserId,
        address: &AddressSnapshot,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE profiles SET
                full_name = $2,
                address_line1 = $3,
                city = $4,
                postcode = $5
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .bind(&address.full_name)
        .bind(&address.address_line1)
        .bind(&address.city)
        .bind(&address.postcode)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("update profile address", e))?;

        Ok(())
    }

    async fn update_status_tags(
        &self,
        user_id: &UserId,
        status: PersonStatus,
        tags: &[String],
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE profiles SET status = $2, tags = $3 WHERE user_id = $1")
            .bind(user_id.as_str())
            .bind(status.as_str())
            .bind(tags)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("update person", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, filter: &PeopleFilter) -> Result<Vec<Profile>, DomainError> {
        let rows: Vec<ProfileRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM profiles
            WHERE ($1::text IS NULL
                   OR full_name ILIKE '%' || $1 || '%'
                   OR email ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR $3 = ANY(tags))
            ORDER BY created_at DESC
            "#,
            PROFILE_COLUMNS
        ))
        .bind(&filter.query)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(&filter.tag)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("search people", e))?;

        rows.into_iter().map(Profile::try_from).collect()
    }

    async fn all_tags(&self) -> Result<Vec<Vec<String>>, DomainError> {
        sqlx::query_scalar("SELECT tags FROM profiles")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("list tags", e))
    }
}
