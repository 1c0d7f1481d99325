//! Event registration and check-in errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | RegistrationNotFound | 404 |
//! | CapacityReached | 409 |
//! | RegistrationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, EventId, RegistrationId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// Event missing or unpublished.
    NotFound(EventId),

    RegistrationNotFound(RegistrationId),

    CapacityReached(EventId),

    /// Insert rejected for a reason other than a duplicate.
    RegistrationFailed(String),

    Infrastructure(String),
}

impl EventError {
    pub fn not_found(id: EventId) -> Self {
        EventError::NotFound(id)
    }

    pub fn registration_not_found(id: RegistrationId) -> Self {
        EventError::RegistrationNotFound(id)
    }

    pub fn capacity_reached(id: EventId) -> Self {
        EventError::CapacityReached(id)
    }

    pub fn registration_failed(reason: impl Into<String>) -> Self {
        EventError::RegistrationFailed(reason.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        EventError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EventError::NotFound(_) => ErrorCode::EventNotFound,
            EventError::RegistrationNotFound(_) => ErrorCode::RegistrationNotFound,
            EventError::CapacityReached(_) => ErrorCode::CapacityReached,
            EventError::RegistrationFailed(_) | EventError::Infrastructure(_) => {
                ErrorCode::DatabaseError
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            EventError::NotFound(_) => "Event not found.",
            EventError::RegistrationNotFound(_) => "Registration not found.",
            EventError::CapacityReached(_) => "Event capacity reached.",
            EventError::RegistrationFailed(_) => "Unable to register right now.",
            EventError::Infrastructure(_) => "Something went wrong. Please try again.",
        }
        .to_string()
    }
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventError::RegistrationFailed(reason) | EventError::Infrastructure(reason) => {
                write!(f, "{} ({})", self.message(), reason)
            }
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for EventError {}

impl From<DomainError> for EventError {
    fn from(err: DomainError) -> Self {
        EventError::Infrastructure(err.to_string())
    }
}
