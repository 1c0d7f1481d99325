//! Giving-specific error types.
//!
//! Covers checkout initiation and webhook reconciliation.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidAmount | 400 |
//! | FundRequired | 400 |
//! | FundNotFound | 404 |
//! | GiftAidDisabled | 400 |
//! | DeclarationRequired | 400 |
//! | AddressIncomplete | 400 |
//! | CheckoutFailed | 500 |
//! | CheckoutUrlMissing | 500 |
//! | WebhookNotConfigured | 400 |
//! | InvalidWebhookSignature | 400 |
//! | OwnerUnresolved | 400 |
//! | InvalidSessionAmount | 400 |
//! | PersistFailed | 400 |
//! | AlreadyFinalised | 409 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode};

use super::DonationStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GivingError {
    /// Amount did not resolve to an allowed value.
    InvalidAmount,

    /// Fund id missing or malformed.
    FundRequired,

    /// Fund does not exist or is not accepting donations.
    FundNotFound,

    /// Gift Aid was requested while the finance toggle is off.
    GiftAidDisabled,

    /// Gift Aid was requested without accepting the declaration.
    DeclarationRequired,

    /// Gift Aid was requested but name/address are incomplete.
    AddressIncomplete,

    /// Payment provider rejected or failed the session request.
    CheckoutFailed(String),

    /// Payment provider returned a session without a redirect URL.
    CheckoutUrlMissing,

    /// Signature header or shared secret absent.
    WebhookNotConfigured,

    InvalidWebhookSignature,

    /// Neither metadata nor a stored record names the donor.
    OwnerUnresolved,

    /// Session reported a non-positive amount.
    InvalidSessionAmount,

    /// Upsert of the donation row failed.
    PersistFailed(String),

    /// Donation already reached a different terminal status.
    AlreadyFinalised {
        current: DonationStatus,
        attempted: DonationStatus,
    },

    Infrastructure(String),
}

impl GivingError {
    pub fn checkout_failed(reason: impl Into<String>) -> Self {
        GivingError::CheckoutFailed(reason.into())
    }

    pub fn persist_failed(reason: impl Into<String>) -> Self {
        GivingError::PersistFailed(reason.into())
    }

    pub fn already_finalised(current: DonationStatus, attempted: DonationStatus) -> Self {
        GivingError::AlreadyFinalised { current, attempted }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        GivingError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            GivingError::InvalidAmount => ErrorCode::OutOfRange,
            GivingError::FundRequired => ErrorCode::EmptyField,
            GivingError::FundNotFound => ErrorCode::FundNotFound,
            GivingError::GiftAidDisabled
            | GivingError::DeclarationRequired
            | GivingError::AddressIncomplete
            | GivingError::InvalidSessionAmount => ErrorCode::ValidationFailed,
            GivingError::CheckoutFailed(_) | GivingError::CheckoutUrlMissing => {
                ErrorCode::PaymentProviderError
            }
            GivingError::WebhookNotConfigured | GivingError::InvalidWebhookSignature => {
                ErrorCode::Unauthorized
            }
            GivingError::OwnerUnresolved => ErrorCode::ProfileNotFound,
            GivingError::PersistFailed(_) | GivingError::Infrastructure(_) => {
                ErrorCode::DatabaseError
            }
            GivingError::AlreadyFinalised { .. } => ErrorCode::InvalidStateTransition,
        }
    }

    /// User-facing message. Internal reasons are never included.
    pub fn message(&self) -> String {
        match self {
            GivingError::InvalidAmount => "Invalid donation amount.",
            GivingError::FundRequired => "Fund is required.",
            GivingError::FundNotFound => "Fund not found or inactive.",
            GivingError::GiftAidDisabled => "Gift Aid is currently disabled.",
            GivingError::DeclarationRequired => "Gift Aid declaration consent is required.",
            GivingError::AddressIncomplete => "Gift Aid requires full name and address details.",
            GivingError::CheckoutFailed(_) | GivingError::Infrastructure(_) => {
                "Unable to start checkout right now."
            }
            GivingError::CheckoutUrlMissing => "Stripe checkout URL unavailable.",
            GivingError::WebhookNotConfigured => "Missing webhook signature configuration.",
            GivingError::InvalidWebhookSignature => "Invalid webhook signature.",
            GivingError::OwnerUnresolved => "Unable to resolve donation owner.",
            GivingError::InvalidSessionAmount => "Invalid donation amount from session.",
            GivingError::PersistFailed(_) => "Failed to persist donation status.",
            GivingError::AlreadyFinalised { .. } => {
                "Donation already finalised with a different status."
            }
        }
        .to_string()
    }
}

impl std::fmt::Display for GivingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GivingError::CheckoutFailed(reason)
            | GivingError::PersistFailed(reason)
            | GivingError::Infrastructure(reason) => write!(f, "{} ({})", self.message(), reason),
            GivingError::AlreadyFinalised { current, attempted } => {
                write!(f, "{} ({} -> {})", self.message(), current, attempted)
            }
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for GivingError {}

impl From<DomainError> for GivingError {
    fn from(err: DomainError) -> Self {
        GivingError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_hides_internal_reason() {
        let err = GivingError::checkout_failed("stripe 502 bad gateway");
        assert_eq!(err.message(), "Unable to start checkout right now.");
        assert!(err.to_string().contains("stripe 502"));
    }

    #[test]
    fn finalised_conflict_names_both_statuses() {
        let err = GivingError::already_finalised(DonationStatus::Succeeded, DonationStatus::Expired);
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
        assert!(err.to_string().contains("SUCCEEDED -> EXPIRED"));
    }

    #[test]
    fn domain_error_becomes_infrastructure() {
        let err: GivingError = DomainError::new(ErrorCode::DatabaseError, "boom").into();
        assert!(matches!(err, GivingError::Infrastructure(_)));
    }
}
