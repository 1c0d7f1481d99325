//! Append-only store of Gift Aid declarations.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::giving::GiftAidDeclaration;

/// Declarations are never updated or deleted.
#[async_trait]
pub trait GiftAidDeclarationRepository: Send + Sync {
    async fn append(&self, declaration: &GiftAidDeclaration) -> Result<(), DomainError>;
}
