//! Notifier that keeps sent messages in memory.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{
    DonationReceipt, ReceiptNotifier, RegistrationConfirmation, RegistrationNotifier,
};

#[derive(Default)]
pub struct RecordingNotifier {
    receipts: Mutex<Vec<DonationReceipt>>,
    confirmations: Mutex<Vec<RegistrationConfirmation>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails after this call.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn receipts(&self) -> Vec<DonationReceipt> {
        self.receipts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn confirmations(&self) -> Vec<RegistrationConfirmation> {
        self.confirmations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(ErrorCode::NotificationError, "mail relay unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl ReceiptNotifier for RecordingNotifier {
    async fn send_receipt(&self, receipt: &DonationReceipt) -> Result<(), DomainError> {
        self.check()?;
        self.receipts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(receipt.clone());
        Ok(())
    }
}

#[async_trait]
impl RegistrationNotifier for RecordingNotifier {
    async fn send_registration_confirmation(
        &self,
        confirmation: &RegistrationConfirmation,
    ) -> Result<(), DomainError> {
        self.check()?;
        self.confirmations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(confirmation.clone());
        Ok(())
    }
}
