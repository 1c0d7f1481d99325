//! Donation payment record and its status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    DonationId, FundId, StateMachine, Timestamp, UserId, ValidationError,
};

use super::DonationAmount;

/// Lifecycle of a donation, keyed by the hosted checkout session.
///
/// ```text
/// PENDING ──▶ SUCCEEDED
///    │  ├──▶ FAILED
///    │  └──▶ EXPIRED
///    └──▶ COMPLETED ──▶ SUCCEEDED | FAILED   (async settlement)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DonationStatus {
    /// Checkout started, no outcome yet.
    Pending,
    /// Payment settled.
    Succeeded,
    /// Checkout finished but settlement is still outstanding.
    Completed,
    Failed,
    Expired,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "PENDING",
            DonationStatus::Succeeded => "SUCCEEDED",
            DonationStatus::Completed => "COMPLETED",
            DonationStatus::Failed => "FAILED",
            DonationStatus::Expired => "EXPIRED",
        }
    }

    pub fn parse(raw: &str) -> Option<DonationStatus> {
        match raw {
            "PENDING" => Some(DonationStatus::Pending),
            "SUCCEEDED" => Some(DonationStatus::Succeeded),
            "COMPLETED" => Some(DonationStatus::Completed),
            "FAILED" => Some(DonationStatus::Failed),
            "EXPIRED" => Some(DonationStatus::Expired),
            _ => None,
        }
    }

    /// Whether moving from `previous` to `self` should trigger a receipt.
    pub fn warrants_receipt(&self, previous: Option<DonationStatus>) -> bool {
        *self == DonationStatus::Succeeded && previous != Some(DonationStatus::Succeeded)
    }

    /// Stored statuses from which `target` may be written, including itself.
    pub fn accepted_predecessors(target: DonationStatus) -> Vec<DonationStatus> {
        Self::ALL
            .into_iter()
            .filter(|from| *from == target || from.can_transition_to(&target))
            .collect()
    }

    pub const ALL: [DonationStatus; 5] = [
        DonationStatus::Pending,
        DonationStatus::Succeeded,
        DonationStatus::Completed,
        DonationStatus::Failed,
        DonationStatus::Expired,
    ];

    /// Applies an incoming status to the stored one.
    ///
    /// Re-applying the current status is accepted. Anything else must be a
    /// listed transition.
    pub fn reconcile(&self, incoming: DonationStatus) -> Result<DonationStatus, ValidationError> {
        if *self == incoming {
            return Ok(incoming);
        }
        self.transition_to(incoming)
    }
}

impl StateMachine for DonationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DonationStatus::*;
        matches!(
            (self, target),
            (Pending, Succeeded)
                | (Pending, Completed)
                | (Pending, Failed)
                | (Pending, Expired)
                | (Completed, Succeeded)
                | (Completed, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DonationStatus::*;
        match self {
            Pending => vec![Succeeded, Completed, Failed, Expired],
            Completed => vec![Succeeded, Failed],
            Succeeded | Failed | Expired => vec![],
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment record for a single one-off donation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donation {
    pub id: DonationId,
    pub user_id: UserId,
    pub fund_id: Option<FundId>,
    pub amount: DonationAmount,
    pub currency: String,
    /// Hosted checkout session id; unique across donations.
    pub stripe_session_id: String,
    pub payment_intent_id: Option<String>,
    pub status: DonationStatus,
    pub created_at: Timestamp,
}

impl Donation {
    /// Creates the PENDING record persisted when checkout starts.
    pub fn pending(
        user_id: UserId,
        fund_id: FundId,
        amount: DonationAmount,
        currency: impl Into<String>,
        stripe_session_id: impl Into<String>,
        payment_intent_id: Option<String>,
    ) -> Self {
        Self {
            id: DonationId::new(),
            user_id,
            fund_id: Some(fund_id),
            amount,
            currency: currency.into(),
            stripe_session_id: stripe_session_id.into(),
            payment_intent_id,
            status: DonationStatus::Pending,
            created_at: Timestamp::now(),
        }
    }
}
