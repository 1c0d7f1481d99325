//! HTTP adapter for the admin landing page (AccessAdminPanel).
//!
//! - `GET /api/admin/summary` - Sermon, event and new-lead counts

pub mod handlers;
pub mod routes;

pub use routes::dashboard_admin_routes;
