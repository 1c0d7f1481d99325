//! Mock payment provider for testing.
//!
//! Configurable stand-in for `PaymentProvider`:
//! - Canned checkout sessions (or generated `cs_test_*` ones)
//! - Error injection
//! - Recording of checkout requests for assertions
//! - A fixed webhook event returned on every verification

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider, WebhookEvent,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.set_webhook_event(event);
///
/// let verified = mock.verify_webhook(b"{}", "t=1,v1=sig").await?;
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_checkout: Option<CheckoutSession>,
    checkout_error: Option<PaymentError>,
    checkout_requests: Vec<CreateCheckoutRequest>,
    webhook_event: Option<WebhookEvent>,
    webhook_mode: WebhookVerifyMode,
    sessions_created: u32,
}

#[derive(Default, Clone, Copy)]
enum WebhookVerifyMode {
    #[default]
    AcceptAll,
    AlwaysFail,
    NotConfigured,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock whose webhook verification always fails the signature check.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.state().webhook_mode = WebhookVerifyMode::AlwaysFail;
        mock
    }

    /// Mock with no webhook signing secret.
    pub fn without_webhook_secret() -> Self {
        let mock = Self::new();
        mock.state().webhook_mode = WebhookVerifyMode::NotConfigured;
        mock
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Session returned by the next `create_checkout_session` call.
    pub fn set_checkout_session(&self, session: CheckoutSession) {
        self.state().next_checkout = Some(session);
    }

    pub fn set_checkout_error(&self, error: PaymentError) {
        self.state().checkout_error = Some(error);
    }

    /// Event returned by every successful verification.
    pub fn set_webhook_event(&self, event: WebhookEvent) {
        self.state().webhook_event = Some(event);
    }

    pub fn checkout_requests(&self) -> Vec<CreateCheckoutRequest> {
        self.state().checkout_requests.clone()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let mut state = self.state();
        state.checkout_requests.push(request);

        if let Some(error) = state.checkout_error.clone() {
            return Err(error);
        }

        if let Some(session) = state.next_checkout.take() {
            return Ok(session);
        }

        state.sessions_created += 1;
        let id = format!("cs_test_{:04}", state.sessions_created);
        Ok(CheckoutSession {
            url: Some(format!("https://checkout.stripe.com/c/pay/{}", id)),
            id,
            payment_intent_id: None,
        })
    }

    async fn verify_webhook(
        &self,
        _payload: &[u8],
        _signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        let state = self.state();
        match state.webhook_mode {
            WebhookVerifyMode::AlwaysFail => {
                Err(PaymentError::invalid_webhook("Signature mismatch"))
            }
            WebhookVerifyMode::NotConfigured => {
                Err(PaymentError::not_configured("Webhook secret not set"))
            }
            WebhookVerifyMode::AcceptAll => state
                .webhook_event
                .clone()
                .ok_or_else(|| PaymentError::invalid_webhook("No event configured")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::collections::HashMap;

    fn request() -> CreateCheckoutRequest {
        CreateCheckoutRequest {
            user_id: UserId::new("u1").unwrap(),
            email: None,
            amount_pence: 1000,
            currency: "gbp".to_string(),
            product_name: "Donation: General Fund".to_string(),
            description: "One-off donation".to_string(),
            success_url: "https://church.example/give?status=success".to_string(),
            cancel_url: "https://church.example/give?status=cancelled".to_string(),
            metadata: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn generates_distinct_sessions() {
        let mock = MockPaymentProvider::new();

        let a = mock.create_checkout_session(request()).await.unwrap();
        let b = mock.create_checkout_session(request()).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(a.url.unwrap().ends_with(&a.id));
        assert_eq!(mock.checkout_requests().len(), 2);
    }

    #[tokio::test]
    async fn rejecting_mock_fails_verification() {
        let mock = MockPaymentProvider::rejecting_webhooks();
        let err = mock.verify_webhook(b"{}", "sig").await.unwrap_err();
        assert_eq!(err.code, crate::ports::PaymentErrorCode::InvalidWebhook);
    }
}
