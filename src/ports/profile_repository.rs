//! ProfileRepository port for the application profile behind each identity.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::people::{AddressSnapshot, PeopleFilter, PersonStatus, Profile};

/// Repository for profiles, used by identity resolution, checkout and the CRM.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find the profile for an identity.
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;

    /// Insert a profile unless one already exists for the same user.
    ///
    /// Concurrent first requests for the same identity must not fail.
    async fn insert_if_absent(&self, profile: &Profile) -> Result<(), DomainError>;

    /// Overwrite the name and postal address fields.
    async fn update_address(
        &self,
        user_id: &UserId,
        address: &AddressSnapshot,
    ) -> Result<(), DomainError>;

    /// Set CRM status and tags. Returns `false` if no profile matched.
    async fn update_status_tags(
        &self,
        user_id: &UserId,
        status: PersonStatus,
        tags: &[String],
    ) -> Result<bool, DomainError>;

    /// Profiles matching the filter, newest first.
    async fn search(&self, filter: &PeopleFilter) -> Result<Vec<Profile>, DomainError>;

    /// Raw tag arrays of every profile, for building the tag picker.
    async fn all_tags(&self) -> Result<Vec<Vec<String>>, DomainError>;
}
