//! Visitor leads captured by the public "New here" form.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::people::Lead;

#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn insert(&self, lead: &Lead) -> Result<(), DomainError>;
}
