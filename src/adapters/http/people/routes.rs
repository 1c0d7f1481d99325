//! Axum router for the people CRM.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{add_note, get_person, search_people, submit_lead, update_person};

/// Mounted at `/api/admin`.
pub fn people_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/people", get(search_people))
        .route("/people/:user_id", get(get_person).put(update_person))
        .route("/people/:user_id/notes", post(add_note))
}

/// Mounted at `/api`.
pub fn people_routes() -> Router<AppState> {
    Router::new().route("/leads", post(submit_lead))
}
