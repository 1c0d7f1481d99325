//! Read access to donation funds.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FundId};
use crate::domain::giving::Fund;

#[async_trait]
pub trait FundReader: Send + Sync {
    /// Fund by id, only if it is accepting donations.
    async fn find_active(&self, id: &FundId) -> Result<Option<Fund>, DomainError>;

    /// Fund by id regardless of state (receipts for retired funds).
    async fn find(&self, id: &FundId) -> Result<Option<Fund>, DomainError>;

    /// Active funds ordered by name.
    async fn list_active(&self) -> Result<Vec<Fund>, DomainError>;
}
