//! Axum router for the admin dashboard.

use axum::{routing::get, Router};

use super::super::state::AppState;
use super::handlers::admin_summary;

/// Mounted at `/api/admin`.
pub fn dashboard_admin_routes() -> Router<AppState> {
    Router::new().route("/summary", get(admin_summary))
}
