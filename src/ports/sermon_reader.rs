//! Read access to published sermons.

use async_trait::async_trait;

use crate::domain::content::Sermon;
use crate::domain::foundation::{DomainError, SermonId};

#[async_trait]
pub trait SermonReader: Send + Sync {
    /// Published sermons, most recently preached first.
    async fn list_published(&self) -> Result<Vec<Sermon>, DomainError>;

    async fn find_published(&self, id: &SermonId) -> Result<Option<Sermon>, DomainError>;
}
