//! Notifier that writes emails to the log instead of sending them.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{
    DonationReceipt, ReceiptNotifier, RegistrationConfirmation, RegistrationNotifier,
};

use super::EmailMessage;

#[derive(Debug, Clone, Default)]
pub struct ConsoleEmailNotifier;

impl ConsoleEmailNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReceiptNotifier for ConsoleEmailNotifier {
    async fn send_receipt(&self, receipt: &DonationReceipt) -> Result<(), DomainError> {
        let message = EmailMessage::receipt(receipt);
        tracing::info!(
            to = %message.to,
            amount_pence = receipt.amount_pence,
            currency = %receipt.currency,
            fund = %receipt.fund_name,
            status = %receipt.status,
            "[donation-receipt]"
        );
        Ok(())
    }
}

#[async_trait]
impl RegistrationNotifier for ConsoleEmailNotifier {
    async fn send_registration_confirmation(
        &self,
        confirmation: &RegistrationConfirmation,
    ) -> Result<(), DomainError> {
        tracing::info!(
            to = %confirmation.to,
            event = %confirmation.event_title,
            starts_at = %confirmation.event_starts_at,
            token = %confirmation.check_in_token,
            "[registration-email] confirmation"
        );
        Ok(())
    }
}
