//! Read access to church events.

use async_trait::async_trait;

use crate::domain::events::Event;
use crate::domain::foundation::{DomainError, EventId};

#[async_trait]
pub trait EventReader: Send + Sync {
    /// Event by id, only when published.
    async fn find_published(&self, id: &EventId) -> Result<Option<Event>, DomainError>;

    /// Event by id including drafts (admin screens).
    async fn find(&self, id: &EventId) -> Result<Option<Event>, DomainError>;

    /// Published events ordered by start time.
    async fn list_published(&self) -> Result<Vec<Event>, DomainError>;
}
