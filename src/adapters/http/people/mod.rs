//! HTTP adapter for the admin people CRM (ManagePeople) and visitor leads.
//!
//! - `POST /api/leads` - Public "New here" form
//! - `GET /api/admin/people?q&status&tag` - Search with tag picker
//! - `GET /api/admin/people/:user_id` - Profile and notes
//! - `PUT /api/admin/people/:user_id` - Set status and tags
//! - `POST /api/admin/people/:user_id/notes` - Add a pastoral note

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{people_admin_routes, people_routes};
