//! RequireRoleHandler - the back-office role gate.

use std::sync::Arc;

use crate::domain::access::{authorize, AccessError, Capability};
use crate::domain::foundation::AuthenticatedUser;
use crate::domain::people::Profile;
use crate::ports::ProfileRepository;

use super::EnsureProfileHandler;

/// Caller that passed the gate, with the profile the decision was made on.
#[derive(Debug, Clone)]
pub struct RoleGate {
    pub user: AuthenticatedUser,
    pub profile: Profile,
}

pub struct RequireRoleHandler {
    ensure_profile: EnsureProfileHandler,
}

impl RequireRoleHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self {
            ensure_profile: EnsureProfileHandler::new(profiles),
        }
    }

    pub async fn handle(
        &self,
        user: &AuthenticatedUser,
        capability: Capability,
    ) -> Result<RoleGate, AccessError> {
        let profile = self.ensure_profile.handle(user).await?;

        if let Err(denied) = authorize(profile.role, capability) {
            tracing::warn!(
                user_id = %user.id,
                role = %denied.role,
                capability = %denied.capability,
                "Role gate denied access"
            );
            return Err(denied.into());
        }

        Ok(RoleGate {
            user: user.clone(),
            profile,
        })
    }
}
