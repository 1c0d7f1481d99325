//! Pastoral notes attached to a person.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::people::PersonNote;

#[async_trait]
pub trait PersonNoteRepository: Send + Sync {
    /// Notes about a person, newest first.
    async fn list_for(&self, user_id: &UserId) -> Result<Vec<PersonNote>, DomainError>;

    async fn insert(&self, note: &PersonNote) -> Result<(), DomainError>;
}
