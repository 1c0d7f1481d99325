//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is produced by whichever `SessionValidator` adapter is
//! wired in (hosted OIDC provider in production, a mock in tests) and injected
//! into request extensions by the HTTP middleware.

use super::UserId;
use thiserror::Error;

/// Identity extracted from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Subject identifier from the auth provider.
    pub id: UserId,

    /// Email claim, when the provider supplies one.
    pub email: Option<String>,

    /// Display name if available (`name` or `preferred_username` claim).
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: Option<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email,
            display_name,
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable (network, JWKS, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
