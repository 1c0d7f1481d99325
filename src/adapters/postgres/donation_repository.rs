//! PostgreSQL implementation of DonationRepository.
//!
//! `reconcile` runs in one transaction. The stored row is locked with
//! `FOR UPDATE` before the status guard is checked, so concurrent
//! redeliveries of the same session see each other's writes in order and
//! only one of them observes the entry into SUCCEEDED.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, DonationId, ErrorCode, FundId, Timestamp};
use crate::domain::giving::{Donation, DonationAmount, DonationStatus};
use crate::ports::{DonationRepository, DonationUpsert, ReconcileWrite};

use super::parse_user_id;

const SESSION_ID_CONSTRAINT: &str = "donations_stripe_session_id_key";

pub struct PostgresDonationRepository {
    pool: PgPool,
}

impl PostgresDonationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DonationRow {
    id: Uuid,
    user_id: String,
    fund_id: Option<Uuid>,
    amount_pence: i64,
    currency: String,
    stripe_session_id: String,
    payment_intent_id: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<DonationRow> for Donation {
    type Error = DomainError;

    fn try_from(row: DonationRow) -> Result<Self, Self::Error> {
        let amount = DonationAmount::from_provider(row.amount_pence).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid stored amount: {}", row.amount_pence),
            )
        })?;

        Ok(Donation {
            id: DonationId::from_uuid(row.id),
            user_id: parse_user_id(row.user_id)?,
            fund_id: row.fund_id.map(FundId::from_uuid),
            amount,
            currency: row.currency,
            stripe_session_id: row.stripe_session_id,
            payment_intent_id: row.payment_intent_id,
            status: parse_status(&row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn parse_status(raw: &str) -> Result<DonationStatus, DomainError> {
    DonationStatus::parse(raw).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid donation status: {}", raw),
        )
    })
}

#[async_trait]
impl DonationRepository for PostgresDonationRepository {
    async fn insert_pending(&self, donation: &Donation) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO donations (
                id, user_id, fund_id, amount_pence, currency,
                stripe_session_id, payment_intent_id, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(donation.id.as_uuid())
        .bind(donation.user_id.as_str())
        .bind(donation.fund_id.map(|f| *f.as_uuid()))
        .bind(donation.amount.pence())
        .bind(&donation.currency)
        .bind(&donation.stripe_session_id)
        .bind(&donation.payment_intent_id)
        .bind(donation.status.as_str())
        .bind(donation.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(SESSION_ID_CONSTRAINT) {
                    return DomainError::new(
                        ErrorCode::UniqueViolation,
                        "Donation already recorded for this checkout session",
                    );
                }
            }
            DomainError::database("insert donation", e)
        })?;

        Ok(())
    }

    async fn find_by_session_id(&self, session_id: &str) -> Result<Option<Donation>, DomainError> {
        let row: Option<DonationRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, fund_id, amount_pence, currency,
                   stripe_session_id, payment_intent_id, status, created_at
            FROM donations
            WHERE stripe_session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("find donation", e))?;

        row.map(Donation::try_from).transpose()
    }

    async fn reconcile(&self, upsert: &DonationUpsert) -> Result<ReconcileWrite, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("begin reconcile", e))?;

        let mut previous = lock_status(&mut tx, &upsert.stripe_session_id).await?;

        if previous.is_none() {
            let inserted: Option<Uuid> = sqlx::query_scalar(
                r#"
                INSERT INTO donations (
                    id, stripe_session_id, user_id, fund_id, amount_pence,
                    currency, payment_intent_id, status
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (stripe_session_id) DO NOTHING
                RETURNING id
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&upsert.stripe_session_id)
            .bind(upsert.user_id.as_str())
            .bind(upsert.fund_id.map(|f| *f.as_uuid()))
            .bind(upsert.amount.pence())
            .bind(&upsert.currency)
            .bind(&upsert.payment_intent_id)
            .bind(upsert.status.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::database("insert reconciled donation", e))?;

            if inserted.is_some() {
                commit(tx).await?;
                return Ok(ReconcileWrite::Applied { previous: None });
            }
            // Lost the insert race; the winner has committed by now.
            previous = lock_status(&mut tx, &upsert.stripe_session_id).await?;
        }

        let Some(current) = previous else {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Donation row vanished during reconcile",
            ));
        };

        if !DonationStatus::accepted_predecessors(upsert.status).contains(&current) {
            commit(tx).await?;
            return Ok(ReconcileWrite::Rejected { current });
        }

        sqlx::query(
            r#"
            UPDATE donations SET
                user_id = $2,
                fund_id = $3,
                amount_pence = $4,
                currency = $5,
                payment_intent_id = $6,
                status = $7,
                updated_at = now()
            WHERE stripe_session_id = $1
            "#,
        )
        .bind(&upsert.stripe_session_id)
        .bind(upsert.user_id.as_str())
        .bind(upsert.fund_id.map(|f| *f.as_uuid()))
        .bind(upsert.amount.pence())
        .bind(&upsert.currency)
        .bind(&upsert.payment_intent_id)
        .bind(upsert.status.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("update reconciled donation", e))?;

        commit(tx).await?;
        Ok(ReconcileWrite::Applied {
            previous: Some(current),
        })
    }
}

/// Reads the stored status and holds the row lock until the transaction ends.
async fn lock_status(
    tx: &mut Transaction<'_, Postgres>,
    session_id: &str,
) -> Result<Option<DonationStatus>, DomainError> {
    let status: Option<String> = sqlx::query_scalar(
        "SELECT status FROM donations WHERE stripe_session_id = $1 FOR UPDATE",
    )
    .bind(session_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| DomainError::database("lock donation", e))?;

    status.as_deref().map(parse_status).transpose()
}

async fn commit(tx: Transaction<'_, Postgres>) -> Result<(), DomainError> {
    tx.commit()
        .await
        .map_err(|e| DomainError::database("commit reconcile", e))
}
