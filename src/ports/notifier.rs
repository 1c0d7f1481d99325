//! Outbound notification ports (transactional email).

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::DomainError;

/// Payment receipt sent once a donation settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonationReceipt {
    pub to: String,
    pub amount_pence: i64,
    pub currency: String,
    pub fund_name: String,
    pub status: String,
}

/// Confirmation carrying the token a member shows at the door.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationConfirmation {
    pub to: String,
    pub event_title: String,
    pub event_starts_at: String,
    pub check_in_token: String,
}

#[async_trait]
pub trait ReceiptNotifier: Send + Sync {
    async fn send_receipt(&self, receipt: &DonationReceipt) -> Result<(), DomainError>;
}

#[async_trait]
pub trait RegistrationNotifier: Send + Sync {
    async fn send_registration_confirmation(
        &self,
        confirmation: &RegistrationConfirmation,
    ) -> Result<(), DomainError>;
}
