//! Roles and the capability policy that gates the admin back office.

mod errors;
mod policy;
mod role;

pub use errors::{AccessError, DENIED_REDIRECT};
pub use policy::{authorize, has_capability, roles_with, AccessDenied, Capability};
pub use role::Role;
