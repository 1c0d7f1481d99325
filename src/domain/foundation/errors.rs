//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // Not found errors
    ProfileNotFound,
    FundNotFound,
    DonationNotFound,
    EventNotFound,
    RegistrationNotFound,
    SermonNotFound,

    // State errors
    InvalidStateTransition,
    CapacityReached,
    UniqueViolation,

    // Authorization errors
    Unauthorized,
    Forbidden,

    // External service errors
    PaymentProviderError,
    NotificationError,

    // Infrastructure errors
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::ProfileNotFound => "PROFILE_NOT_FOUND",
            ErrorCode::FundNotFound => "FUND_NOT_FOUND",
            ErrorCode::DonationNotFound => "DONATION_NOT_FOUND",
            ErrorCode::EventNotFound => "EVENT_NOT_FOUND",
            ErrorCode::RegistrationNotFound => "REGISTRATION_NOT_FOUND",
            ErrorCode::SermonNotFound => "SERMON_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::CapacityReached => "CAPACITY_REACHED",
            ErrorCode::UniqueViolation => "UNIQUE_VIOLATION",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::PaymentProviderError => "PAYMENT_PROVIDER_ERROR",
            ErrorCode::NotificationError => "NOTIFICATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Wraps a storage failure, keeping the operation name as a detail.
    pub fn database(operation: &str, err: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::DatabaseError,
            format!("Failed to {}: {}", operation, err),
        )
        .with_detail("operation", operation)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("fund_id");
        assert_eq!(format!("{}", err), "Field 'fund_id' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("amount_pence", 100, 100_000_000, 50);
        assert_eq!(
            format!("{}", err),
            "Field 'amount_pence' must be between 100 and 100000000, got 50"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::EventNotFound, "Event not found");
        assert_eq!(format!("{}", err), "[EVENT_NOT_FOUND] Event not found");
    }

    #[test]
    fn domain_error_validation_records_field() {
        let err = DomainError::validation("postcode", "Postcode is required");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"postcode".to_string()));
    }

    #[test]
    fn database_error_keeps_operation() {
        let err = DomainError::database("insert donation", "connection reset");
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Failed to insert donation: connection reset");
        assert_eq!(err.details.get("operation"), Some(&"insert donation".to_string()));
    }

    #[test]
    fn validation_error_converts_with_matching_code() {
        let err: DomainError = ValidationError::invalid_format("token", "not hex").into();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }
}
