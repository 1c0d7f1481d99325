//! Plain-text rendering of outbound emails.

use serde::Serialize;

use crate::ports::{DonationReceipt, RegistrationConfirmation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl EmailMessage {
    pub fn receipt(receipt: &DonationReceipt) -> Self {
        let amount = format!(
            "{}.{:02} {}",
            receipt.amount_pence / 100,
            receipt.amount_pence % 100,
            receipt.currency.to_uppercase()
        );
        Self {
            to: receipt.to.clone(),
            subject: "Thank you for your donation".to_string(),
            text: format!(
                "We have received your donation of {} to the {}.\n\nStatus: {}\n",
                amount, receipt.fund_name, receipt.status
            ),
        }
    }

    pub fn registration_confirmation(confirmation: &RegistrationConfirmation) -> Self {
        Self {
            to: confirmation.to.clone(),
            subject: format!("You're registered: {}", confirmation.event_title),
            text: format!(
                "You are registered for {} on {}.\n\nShow this check-in code at the door: {}\n",
                confirmation.event_title, confirmation.event_starts_at, confirmation.check_in_token
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_formats_amount_in_major_units() {
        let message = EmailMessage::receipt(&DonationReceipt {
            to: "ada@example.org".to_string(),
            amount_pence: 2505,
            currency: "gbp".to_string(),
            fund_name: "General Fund".to_string(),
            status: "SUCCEEDED".to_string(),
        });

        assert_eq!(message.to, "ada@example.org");
        assert!(message.text.contains("25.05 GBP"));
        assert!(message.text.contains("General Fund"));
    }

    #[test]
    fn confirmation_includes_check_in_code() {
        let message = EmailMessage::registration_confirmation(&RegistrationConfirmation {
            to: "ada@example.org".to_string(),
            event_title: "Harvest Supper".to_string(),
            event_starts_at: "2026-10-01T18:00:00+00:00".to_string(),
            check_in_token: "abc123".to_string(),
        });

        assert_eq!(message.subject, "You're registered: Harvest Supper");
        assert!(message.text.contains("abc123"));
    }
}
