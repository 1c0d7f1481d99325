//! DonationRepository port: payment records keyed by checkout session.
//!
//! # Design
//!
//! - **One row per session**: `stripe_session_id` is unique in storage
//! - **Atomic reconcile**: the read of the previous status and the status
//!   write happen under one row lock, so a concurrent redelivery cannot
//!   also see the entry into SUCCEEDED

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FundId, UserId};
use crate::domain::giving::{Donation, DonationAmount, DonationStatus};

/// Fields written when a webhook reconciles a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationUpsert {
    pub stripe_session_id: String,
    pub user_id: UserId,
    pub fund_id: Option<FundId>,
    pub amount: DonationAmount,
    pub currency: String,
    pub payment_intent_id: Option<String>,
    pub status: DonationStatus,
}

/// Outcome of a reconcile write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileWrite {
    /// Row inserted or updated. `previous` is `None` for a fresh insert.
    Applied { previous: Option<DonationStatus> },

    /// Stored status does not accept the incoming one; nothing written.
    Rejected { current: DonationStatus },
}

#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Persist the PENDING record created at checkout.
    async fn insert_pending(&self, donation: &Donation) -> Result<(), DomainError>;

    async fn find_by_session_id(&self, session_id: &str)
        -> Result<Option<Donation>, DomainError>;

    /// Insert or update by session id.
    ///
    /// An existing row is only updated when its status is one of
    /// `DonationStatus::accepted_predecessors(upsert.status)`.
    async fn reconcile(&self, upsert: &DonationUpsert) -> Result<ReconcileWrite, DomainError>;
}
