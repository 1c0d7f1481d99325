//! Session validation port.
//!
//! The hosted auth provider issues bearer tokens; this port turns one into an
//! [`AuthenticatedUser`]. Every implementation must check issuer, audience
//! and expiry before trusting the subject claim.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates bearer tokens for the HTTP auth middleware.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed tokens or bad signatures
/// - `AuthError::TokenExpired` for expired tokens
/// - `AuthError::ServiceUnavailable` when keys cannot be fetched
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    struct FixedTokenValidator;

    #[async_trait]
    impl SessionValidator for FixedTokenValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            match token {
                "good" => {
                    let id = UserId::new("member-1").map_err(|_| AuthError::InvalidToken)?;
                    Ok(AuthenticatedUser::new(id, None, None))
                }
                "stale" => Err(AuthError::TokenExpired),
                _ => Err(AuthError::InvalidToken),
            }
        }
    }

    #[tokio::test]
    async fn validator_works_through_trait_object() {
        let validator: Box<dyn SessionValidator> = Box::new(FixedTokenValidator);

        let user = validator.validate("good").await.unwrap();
        assert_eq!(user.id.as_str(), "member-1");
        assert_eq!(validator.validate("stale").await, Err(AuthError::TokenExpired));
        assert_eq!(validator.validate("other").await, Err(AuthError::InvalidToken));
    }
}
