//! HTTP adapter for events.
//!
//! ## Public and member endpoints
//! - `GET /api/events` - Published events
//! - `GET /api/events/:id` - One published event
//! - `POST /api/events/:id/register` - Sign up (idempotent)
//! - `GET /api/my/registrations` - Caller's upcoming sign-ups
//!
//! ## Admin endpoints (ManageContent)
//! - `POST /api/admin/events/:id/check-in` - Check in by token
//! - `GET /api/admin/events/:id/check-ins` - Recent check-ins
//! - `POST /api/admin/registrations/:id/check-in-token` - Issue and mail a token

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{events_admin_routes, events_routes};
