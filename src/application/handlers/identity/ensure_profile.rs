//! EnsureProfileHandler - returns the caller's profile, creating it on first sight.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::domain::people::Profile;
use crate::ports::ProfileRepository;

/// Resolves an authenticated identity to its application profile.
///
/// A missing profile is inserted with the lowest-privilege role. The insert
/// tolerates a concurrent first request for the same identity.
pub struct EnsureProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl EnsureProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, user: &AuthenticatedUser) -> Result<Profile, DomainError> {
        if let Some(existing) = self.profiles.find(&user.id).await? {
            return Ok(existing);
        }

        let profile = Profile::first_sight(user);
        self.profiles.insert_if_absent(&profile).await?;

        tracing::info!(user_id = %user.id, "Created profile on first sight");
        Ok(profile)
    }
}
