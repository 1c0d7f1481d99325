//! Authentication adapters implementing `SessionValidator`.
//!
//! - `oidc` - JWKS-backed JWT validation against the hosted auth provider
//! - `mock` - fixed token table for tests and local development

mod mock;
mod oidc;

pub use mock::MockSessionValidator;
pub use oidc::{OidcConfig, OidcSessionValidator};
