//! Resend email delivery.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{
    DonationReceipt, ReceiptNotifier, RegistrationConfirmation, RegistrationNotifier,
};

use super::EmailMessage;

const DEFAULT_API_BASE_URL: &str = "https://api.resend.com";

#[derive(Clone)]
pub struct ResendConfig {
    api_key: SecretString,
    /// Formatted sender, e.g. `Church Office <office@example.org>`.
    from: String,
    api_base_url: String,
}

impl ResendConfig {
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            from: from.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[derive(Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

pub struct ResendEmailNotifier {
    config: ResendConfig,
    http_client: reqwest::Client,
}

impl ResendEmailNotifier {
    pub fn new(config: ResendConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    async fn send(&self, message: EmailMessage) -> Result<(), DomainError> {
        let body = SendEmailBody {
            from: &self.config.from,
            to: [&message.to],
            subject: &message.subject,
            text: &message.text,
        };

        let response = self
            .http_client
            .post(format!("{}/emails", self.config.api_base_url))
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainError::new(ErrorCode::NotificationError, format!("Resend request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %detail, "Resend rejected email");
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                format!("Resend API error ({})", status),
            ));
        }

        tracing::debug!(to = %message.to, subject = %message.subject, "Email sent");
        Ok(())
    }
}

#[async_trait]
impl ReceiptNotifier for ResendEmailNotifier {
    async fn send_receipt(&self, receipt: &DonationReceipt) -> Result<(), DomainError> {
        self.send(EmailMessage::receipt(receipt)).await
    }
}

#[async_trait]
impl RegistrationNotifier for ResendEmailNotifier {
    async fn send_registration_confirmation(
        &self,
        confirmation: &RegistrationConfirmation,
    ) -> Result<(), DomainError> {
        self.send(EmailMessage::registration_confirmation(confirmation)).await
    }
}
