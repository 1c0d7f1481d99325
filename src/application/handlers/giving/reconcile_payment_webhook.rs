//! ReconcilePaymentWebhookHandler - applies checkout session events to donations.
//!
//! Flow: verify signature, map the event to a status, resolve missing fields
//! from the stored record, upsert atomically by session id, then send a
//! receipt on entry into SUCCEEDED.

use std::sync::Arc;

use crate::domain::foundation::{FundId, UserId};
use crate::domain::giving::{
    Donation, DonationAmount, DonationStatus, GivingError, DEFAULT_FUND_NAME,
};
use crate::ports::{
    CheckoutSessionData, DonationReceipt, DonationRepository, DonationUpsert, FundReader,
    PaymentErrorCode, PaymentProvider, ProfileRepository, ReceiptNotifier, ReconcileWrite,
};

const DEFAULT_CURRENCY: &str = "gbp";

/// Raw webhook delivery.
#[derive(Debug, Clone)]
pub struct ReconcilePaymentWebhookCommand {
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header, if present.
    pub signature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Donation row written.
    Reconciled {
        session_id: String,
        status: DonationStatus,
        previous: Option<DonationStatus>,
        receipt_sent: bool,
    },
    /// Verified, but not an event we act on.
    Ignored,
}

pub struct ReconcilePaymentWebhookHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    donations: Arc<dyn DonationRepository>,
    funds: Arc<dyn FundReader>,
    profiles: Arc<dyn ProfileRepository>,
    receipts: Arc<dyn ReceiptNotifier>,
}

impl ReconcilePaymentWebhookHandler {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        donations: Arc<dyn DonationRepository>,
        funds: Arc<dyn FundReader>,
        profiles: Arc<dyn ProfileRepository>,
        receipts: Arc<dyn ReceiptNotifier>,
    ) -> Self {
        Self {
            payment_provider,
            donations,
            funds,
            profiles,
            receipts,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReconcilePaymentWebhookCommand,
    ) -> Result<ReconcileOutcome, GivingError> {
        let signature = cmd
            .signature
            .filter(|s| !s.trim().is_empty())
            .ok_or(GivingError::WebhookNotConfigured)?;

        let event = self
            .payment_provider
            .verify_webhook(&cmd.payload, &signature)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Webhook verification failed");
                match e.code {
                    PaymentErrorCode::NotConfigured => GivingError::WebhookNotConfigured,
                    _ => GivingError::InvalidWebhookSignature,
                }
            })?;

        let (Some(status), Some(session)) = (event.donation_status(), event.session.as_ref())
        else {
            tracing::debug!(event_id = %event.id, event_type = ?event.event_type, "Ignoring webhook event");
            return Ok(ReconcileOutcome::Ignored);
        };

        let existing = self.donations.find_by_session_id(&session.session_id).await?;
        let upsert = resolve_upsert(session, status, existing.as_ref())?;

        if let Some(existing) = &existing {
            if existing.status.reconcile(status).is_err() {
                return Err(self.finalised(&upsert, existing.status));
            }
        }

        let write = self.donations.reconcile(&upsert).await.map_err(|e| {
            tracing::error!(session_id = %upsert.stripe_session_id, error = %e, "Donation upsert failed");
            GivingError::persist_failed(e.to_string())
        })?;

        let previous = match write {
            ReconcileWrite::Applied { previous } => previous,
            ReconcileWrite::Rejected { current } => return Err(self.finalised(&upsert, current)),
        };

        tracing::info!(
            event_id = %event.id,
            session_id = %upsert.stripe_session_id,
            user_id = %upsert.user_id,
            previous = ?previous,
            status = %status,
            "Donation reconciled"
        );

        let receipt_sent = if status.warrants_receipt(previous) {
            self.send_receipt(&upsert).await
        } else {
            false
        };

        Ok(ReconcileOutcome::Reconciled {
            session_id: upsert.stripe_session_id,
            status,
            previous,
            receipt_sent,
        })
    }

    fn finalised(&self, upsert: &DonationUpsert, current: DonationStatus) -> GivingError {
        tracing::warn!(
            session_id = %upsert.stripe_session_id,
            current = %current,
            attempted = %upsert.status,
            "Refusing to move finalised donation"
        );
        GivingError::already_finalised(current, upsert.status)
    }

    /// Sends the receipt. Failures are logged and reported as not sent.
    async fn send_receipt(&self, upsert: &DonationUpsert) -> bool {
        let fund_name = match &upsert.fund_id {
            Some(fund_id) => match self.funds.find(fund_id).await {
                Ok(Some(fund)) if !fund.name.trim().is_empty() => fund.name,
                Ok(_) => DEFAULT_FUND_NAME.to_string(),
                Err(e) => {
                    tracing::warn!(fund_id = %fund_id, error = %e, "Fund lookup for receipt failed");
                    DEFAULT_FUND_NAME.to_string()
                }
            },
            None => DEFAULT_FUND_NAME.to_string(),
        };

        let email = match self.profiles.find(&upsert.user_id).await {
            Ok(profile) => profile.and_then(|p| p.email).filter(|e| !e.trim().is_empty()),
            Err(e) => {
                tracing::error!(user_id = %upsert.user_id, error = %e, "Profile lookup for receipt failed");
                return false;
            }
        };
        let Some(to) = email else {
            tracing::info!(user_id = %upsert.user_id, "No email on profile, receipt skipped");
            return false;
        };

        let receipt = DonationReceipt {
            to,
            amount_pence: upsert.amount.pence(),
            currency: upsert.currency.clone(),
            fund_name,
            status: upsert.status.to_string(),
        };

        match self.receipts.send_receipt(&receipt).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    session_id = %upsert.stripe_session_id,
                    error = %e,
                    "Failed to send donation receipt"
                );
                false
            }
        }
    }
}

/// Fills each donation field from the session, falling back to the stored record.
fn resolve_upsert(
    session: &CheckoutSessionData,
    status: DonationStatus,
    existing: Option<&Donation>,
) -> Result<DonationUpsert, GivingError> {
    let user_id = metadata(session, "user_id")
        .and_then(|raw| UserId::new(raw).ok())
        .or_else(|| existing.map(|d| d.user_id.clone()))
        .ok_or(GivingError::OwnerUnresolved)?;

    let fund_id = metadata(session, "fund_id")
        .and_then(|raw| raw.parse::<FundId>().ok())
        .or_else(|| existing.and_then(|d| d.fund_id));

    let amount = session
        .amount_total
        .or_else(|| existing.map(|d| d.amount.pence()))
        .and_then(DonationAmount::from_provider)
        .ok_or(GivingError::InvalidSessionAmount)?;

    let currency = session
        .currency
        .clone()
        .filter(|c| !c.trim().is_empty())
        .or_else(|| existing.map(|d| d.currency.clone()))
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    let payment_intent_id = session
        .payment_intent_id
        .clone()
        .or_else(|| existing.and_then(|d| d.payment_intent_id.clone()));

    Ok(DonationUpsert {
        stripe_session_id: session.session_id.clone(),
        user_id,
        fund_id,
        amount,
        currency,
        payment_intent_id,
        status,
    })
}

fn metadata<'a>(session: &'a CheckoutSessionData, key: &str) -> Option<&'a str> {
    session
        .metadata
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}
