//! Admin landing page queries.

mod admin_summary;

pub use admin_summary::GetAdminSummaryHandler;
