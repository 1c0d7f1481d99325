//! Stripe payment provider adapter.
//!
//! Creates one-off hosted Checkout Sessions over the REST API and verifies
//! webhook deliveries.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp window (5 minutes old, 60 seconds ahead) against replays
//! - Secrets held as `secrecy::SecretString`

use std::collections::BTreeMap;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    WebhookEvent, WebhookEventType,
};

use super::webhook_types::{
    SignatureHeader, StripeCheckoutSession, StripeErrorResponse, StripeWebhookEvent,
};

type HmacSha256 = Hmac<Sha256>;

const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

const DEFAULT_API_BASE_URL: &str = "https://api.stripe.com";

#[derive(Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...). Webhooks are refused without it.
    webhook_secret: Option<SecretString>,

    api_base_url: String,

    /// Reject test-mode events.
    require_livemode: bool,
}

impl StripeConfig {
    pub fn new(api_key: impl Into<String>, webhook_secret: Option<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: webhook_secret.map(SecretString::new),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            require_livemode: false,
        }
    }

    /// Point at a different API host (stripe-mock, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }
}

pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn verify_signature(
        &self,
        secret: &SecretString,
        payload: &[u8],
        header: &SignatureHeader,
        now: i64,
    ) -> Result<(), PaymentError> {
        let age = now - header.timestamp;
        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                age_secs = age,
                "Webhook event too old - possible replay"
            );
            return Err(PaymentError::invalid_webhook(format!("Event too old ({} seconds)", age)));
        }
        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(event_timestamp = header.timestamp, "Webhook event timestamp in future");
            return Err(PaymentError::invalid_webhook("Event timestamp in future"));
        }

        let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes())
            .map_err(|e| PaymentError::not_configured(format!("Unusable webhook secret: {}", e)))?;
        mac.update(header.timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = mac.finalize().into_bytes();

        let matched = header
            .signatures
            .iter()
            .any(|candidate| expected.as_slice().ct_eq(candidate).unwrap_u8() == 1);

        if !matched {
            tracing::warn!("Webhook signature mismatch");
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }
        Ok(())
    }

    fn parse_event(&self, payload: &[u8]) -> Result<WebhookEvent, PaymentError> {
        let stripe_event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(error = %e, "Webhook payload is not a Stripe event");
            PaymentError::invalid_webhook(format!("Invalid JSON: {}", e))
        })?;

        if self.config.require_livemode && !stripe_event.livemode {
            tracing::warn!(event_id = %stripe_event.id, "Rejected test mode event");
            return Err(PaymentError::invalid_webhook("Test mode events not accepted"));
        }

        let event_type = WebhookEventType::parse(&stripe_event.event_type);
        let session = match event_type {
            WebhookEventType::Unknown(_) => None,
            _ => {
                let session: StripeCheckoutSession =
                    serde_json::from_value(stripe_event.data.object).map_err(|e| {
                        PaymentError::invalid_webhook(format!("Invalid checkout session: {}", e))
                    })?;
                Some(session.into_session_data())
            }
        };

        Ok(WebhookEvent {
            id: stripe_event.id,
            event_type,
            session,
            created_at: stripe_event.created,
        })
    }
}

/// Form-encodes a checkout request the way the Checkout Sessions API expects.
fn checkout_form(request: &CreateCheckoutRequest) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = vec![
        ("mode".into(), "payment".into()),
        ("line_items[0][quantity]".into(), "1".into()),
        ("line_items[0][price_data][currency]".into(), request.currency.clone()),
        (
            "line_items[0][price_data][unit_amount]".into(),
            request.amount_pence.to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]".into(),
            request.product_name.clone(),
        ),
        (
            "line_items[0][price_data][product_data][description]".into(),
            request.description.clone(),
        ),
        ("success_url".into(), request.success_url.clone()),
        ("cancel_url".into(), request.cancel_url.clone()),
        ("client_reference_id".into(), request.user_id.to_string()),
    ];

    if let Some(email) = &request.email {
        params.push(("customer_email".into(), email.clone()));
    }

    let metadata: BTreeMap<_, _> = request.metadata.iter().collect();
    for (key, value) in metadata {
        params.push((format!("metadata[{}]", key), value.clone()));
    }

    params
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), None::<&str>)
            .form(&checkout_form(&request))
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %body, "Stripe checkout session request failed");

            let code = match status.as_u16() {
                401 => PaymentErrorCode::AuthenticationError,
                429 => PaymentErrorCode::RateLimitExceeded,
                _ => PaymentErrorCode::ProviderError,
            };
            let mut error = PaymentError::new(code, format!("Stripe API error ({})", status));
            if let Some(provider_code) = serde_json::from_str::<StripeErrorResponse>(&body)
                .ok()
                .and_then(|r| r.error.code)
            {
                error = error.with_provider_code(provider_code);
            }
            return Err(error);
        }

        let session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        Ok(CheckoutSession {
            payment_intent_id: session.payment_intent_id(),
            id: session.id,
            url: session.url,
        })
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        let secret = self
            .config
            .webhook_secret
            .as_ref()
            .ok_or_else(|| PaymentError::not_configured("Webhook secret not set"))?;

        let header = SignatureHeader::parse(signature)
            .map_err(|e| PaymentError::invalid_webhook(e.to_string()))?;

        self.verify_signature(secret, payload, &header, chrono::Utc::now().timestamp())?;
        self.parse_event(payload)
    }
}
