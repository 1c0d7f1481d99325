//! HTTP adapter for public content.
//!
//! - `GET /api/sermons` - Published sermons, newest first
//! - `GET /api/sermons/:id` - One sermon with its video embed URL

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::content_routes;
