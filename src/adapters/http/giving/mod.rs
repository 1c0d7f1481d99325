//! HTTP adapter for giving.
//!
//! - `POST /api/stripe/checkout` - Start a hosted checkout for a donation
//! - `POST /api/stripe/webhook` - Payment webhooks (signature verified, no auth)
//! - `GET /api/funds` - Active funds and the Gift Aid toggle for the give form
//! - `GET /api/admin/settings/gift-aid` - Gift Aid toggle (finance)
//! - `PUT /api/admin/settings/gift-aid` - Change the Gift Aid toggle (finance)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{giving_admin_routes, giving_routes};
