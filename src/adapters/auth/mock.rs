//! Mock session validator for tests and local development.
//!
//! Accepts a fixed set of tokens, each mapped to a user. Anything else is
//! `InvalidToken`.
//!
//! # Example
//!
//! ```ignore
//! let validator = MockSessionValidator::new()
//!     .with_member("token-ada", "ada");
//!
//! let user = validator.validate("token-ada").await?;
//! assert_eq!(user.id.as_str(), "ada");
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation when set.
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Adds a token for a user with a derived email and display name.
    ///
    /// Blank user ids are ignored.
    pub fn with_member(self, token: impl Into<String>, user_id: &str) -> Self {
        if let Ok(id) = UserId::new(user_id) {
            let user = AuthenticatedUser::new(
                id,
                Some(format!("{}@members.example.org", user_id.trim())),
                Some(format!("Member {}", user_id.trim())),
            );
            self.add_token(token, user);
        }
        self
    }

    pub fn with_error(self, error: AuthError) -> Self {
        *self
            .force_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), user);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_resolves_member() {
        let validator = MockSessionValidator::new().with_member("t1", "ada");

        let user = validator.validate("t1").await.unwrap();

        assert_eq!(user.id.as_str(), "ada");
        assert_eq!(user.email.as_deref(), Some("ada@members.example.org"));
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let validator = MockSessionValidator::new();
        assert_eq!(validator.validate("nope").await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn forced_error_wins() {
        let validator = MockSessionValidator::new()
            .with_member("t1", "ada")
            .with_error(AuthError::service_unavailable("down"));

        assert!(validator.validate("t1").await.unwrap_err().is_transient());
    }
}
