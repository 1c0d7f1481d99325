//! Axum router for account endpoints.

use axum::{routing::get, Router};

use super::super::state::AppState;
use super::handlers::get_account;

/// Mounted at `/api/account`.
pub fn account_routes() -> Router<AppState> {
    Router::new().route("/", get(get_account))
}
