//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Stripe hosted checkout and webhook settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    pub stripe_api_key: String,

    /// Webhook signing secret. Without it every webhook is refused.
    pub stripe_webhook_secret: Option<String>,

    /// ISO currency for checkout sessions.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Reject events sent in test mode.
    #[serde(default)]
    pub require_livemode: bool,
}

impl PaymentConfig {
    pub fn is_test_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_test_")
    }

    pub fn is_live_mode(&self) -> bool {
        self.stripe_api_key.starts_with("sk_live_")
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_API_KEY"));
        }
        if !self.stripe_api_key.starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }
        if let Some(secret) = &self.stripe_webhook_secret {
            if !secret.starts_with("whsec_") {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_api_key: String::new(),
            stripe_webhook_secret: None,
            currency: default_currency(),
            require_livemode: false,
        }
    }
}

fn default_currency() -> String {
    "gbp".to_string()
}
