//! HTTP adapter for the caller's own account.
//!
//! - `GET /api/account` - Profile of the signed-in member, created on first sight

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ProfileResponse;
pub use routes::account_routes;
