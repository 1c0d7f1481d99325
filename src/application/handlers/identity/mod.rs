//! Identity handlers.
//!
//! - `EnsureProfileHandler` - resolve (or lazily create) the caller's profile
//! - `RequireRoleHandler` - role gate for back-office routes

mod ensure_profile;
mod require_role;

pub use ensure_profile::EnsureProfileHandler;
pub use require_role::{RequireRoleHandler, RoleGate};
