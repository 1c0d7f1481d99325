//! Axum routers for event endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    assign_check_in_token, check_in, get_event, list_events, my_registrations, recent_check_ins,
    register,
};

/// Public and member routes, mounted at `/api`.
pub fn events_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/:id", get(get_event))
        .route("/events/:id/register", post(register))
        .route("/my/registrations", get(my_registrations))
}

/// Door and token routes, mounted at `/api/admin`.
pub fn events_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/events/:id/check-in", post(check_in))
        .route("/events/:id/check-ins", get(recent_check_ins))
        .route("/registrations/:id/check-in-token", post(assign_check_in_token))
}
