//! Axum router for sermons.

use axum::{routing::get, Router};

use super::super::state::AppState;
use super::handlers::{get_sermon, list_sermons};

/// Mounted at `/api`.
pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/sermons", get(list_sermons))
        .route("/sermons/:id", get(get_sermon))
}
