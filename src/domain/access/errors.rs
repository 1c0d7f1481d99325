//! Errors raised by the role gate.

use crate::domain::foundation::{DomainError, ErrorCode};

use super::AccessDenied;

/// Safe landing page for callers turned away by the role gate.
pub const DENIED_REDIRECT: &str = "/account";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// Authenticated, but the role lacks the capability.
    Forbidden(AccessDenied),

    /// Profile lookup or creation failed.
    Infrastructure(String),
}

impl AccessError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AccessError::Forbidden(_) => ErrorCode::Forbidden,
            AccessError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AccessError::Forbidden(_) => "You do not have access to this area.".to_string(),
            AccessError::Infrastructure(_) => "Unable to load your profile right now.".to_string(),
        }
    }
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessError::Forbidden(denied) => write!(f, "{}", denied),
            AccessError::Infrastructure(reason) => write!(f, "{} ({})", self.message(), reason),
        }
    }
}

impl std::error::Error for AccessError {}

impl From<AccessDenied> for AccessError {
    fn from(denied: AccessDenied) -> Self {
        AccessError::Forbidden(denied)
    }
}

impl From<DomainError> for AccessError {
    fn from(err: DomainError) -> Self {
        AccessError::Infrastructure(err.to_string())
    }
}
