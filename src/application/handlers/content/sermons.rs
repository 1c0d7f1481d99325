//! Public sermon listing and detail.

use std::sync::Arc;

use crate::domain::content::Sermon;
use crate::domain::foundation::{DomainError, ErrorCode, SermonId};
use crate::ports::SermonReader;

pub struct ListSermonsHandler {
    sermons: Arc<dyn SermonReader>,
}

impl ListSermonsHandler {
    pub fn new(sermons: Arc<dyn SermonReader>) -> Self {
        Self { sermons }
    }

    pub async fn handle(&self) -> Result<Vec<Sermon>, DomainError> {
        self.sermons.list_published().await
    }
}

pub struct GetSermonHandler {
    sermons: Arc<dyn SermonReader>,
}

impl GetSermonHandler {
    pub fn new(sermons: Arc<dyn SermonReader>) -> Self {
        Self { sermons }
    }

    pub async fn handle(&self, id: SermonId) -> Result<Sermon, DomainError> {
        self.sermons
            .find_published(&id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::SermonNotFound, "Sermon not found."))
    }
}
