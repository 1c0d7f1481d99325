//! Payment provider port for hosted checkout and webhook verification.
//!
//! Implementations talk to the payment gateway (Stripe in production).
//! Only one-off hosted checkout sessions are used; there are no customers,
//! subscriptions or saved cards on our side.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::giving::DonationStatus;

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a hosted checkout session for a single payment.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Verify a webhook signature and parse the event.
    ///
    /// Returns `NotConfigured` when no signing secret is available and
    /// `InvalidWebhook` when the signature does not match.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError>;
}

/// Request to create a one-off checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Internal user ID, sent as client reference and metadata.
    pub user_id: UserId,

    /// Customer email for pre-fill.
    pub email: Option<String>,

    /// Amount in minor units.
    pub amount_pence: i64,

    pub currency: String,

    /// Line item name shown on the hosted page.
    pub product_name: String,

    pub description: String,

    pub success_url: String,

    pub cancel_url: String,

    /// Key/value metadata echoed back on webhook events.
    pub metadata: HashMap<String, String>,
}

/// Checkout session returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,

    /// Redirect URL. Absent if the provider did not return one.
    pub url: Option<String>,

    pub payment_intent_id: Option<String>,
}

/// Verified webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEvent {
    pub id: String,
    pub event_type: WebhookEventType,
    /// Checkout session payload for session events.
    pub session: Option<CheckoutSessionData>,
    /// When the event occurred (Unix timestamp).
    pub created_at: i64,
}

impl WebhookEvent {
    /// Donation status implied by this event, if it is a handled session event.
    pub fn donation_status(&self) -> Option<DonationStatus> {
        let session = self.session.as_ref()?;
        match &self.event_type {
            WebhookEventType::CheckoutSessionCompleted => {
                if session.payment_status.as_deref() == Some("paid") {
                    Some(DonationStatus::Succeeded)
                } else {
                    Some(DonationStatus::Completed)
                }
            }
            WebhookEventType::CheckoutSessionAsyncPaymentSucceeded => Some(DonationStatus::Succeeded),
            WebhookEventType::CheckoutSessionAsyncPaymentFailed => Some(DonationStatus::Failed),
            WebhookEventType::CheckoutSessionExpired => Some(DonationStatus::Expired),
            WebhookEventType::Unknown(_) => None,
        }
    }
}

/// Webhook event types we act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventType {
    CheckoutSessionCompleted,
    CheckoutSessionAsyncPaymentSucceeded,
    CheckoutSessionAsyncPaymentFailed,
    CheckoutSessionExpired,
    Unknown(String),
}

impl WebhookEventType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            "checkout.session.async_payment_succeeded" => Self::CheckoutSessionAsyncPaymentSucceeded,
            "checkout.session.async_payment_failed" => Self::CheckoutSessionAsyncPaymentFailed,
            "checkout.session.expired" => Self::CheckoutSessionExpired,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Fields of a checkout session carried by webhook events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutSessionData {
    pub session_id: String,
    pub payment_status: Option<String>,
    pub amount_total: Option<i64>,
    pub currency: Option<String>,
    pub payment_intent_id: Option<String>,
    pub client_reference_id: Option<String>,
    pub metadata: HashMap<String, String>,
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentError {
    pub code: PaymentErrorCode,
    pub message: String,
    /// Provider's error code, if it sent one.
    pub provider_code: Option<String>,
}

impl PaymentError {
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
        }
    }

    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }

    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidWebhook, message)
    }

    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NotConfigured, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        let code = match err.code {
            PaymentErrorCode::InvalidWebhook | PaymentErrorCode::NotConfigured => {
                ErrorCode::Unauthorized
            }
            _ => ErrorCode::PaymentProviderError,
        };
        DomainError::new(code, err.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentErrorCode {
    NetworkError,
    AuthenticationError,
    RateLimitExceeded,
    /// Signature missing, stale or wrong.
    InvalidWebhook,
    /// Signing secret or API key not set.
    NotConfigured,
    ProviderError,
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::InvalidWebhook => "invalid_webhook",
            PaymentErrorCode::NotConfigured => "not_configured",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}
