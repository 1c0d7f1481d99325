//! Axum routers for giving endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    get_gift_aid_setting, list_funds, start_checkout, stripe_webhook, update_gift_aid_setting,
};

/// Public and member routes, mounted at `/api`.
///
/// The webhook carries no bearer token; its body is verified by signature.
pub fn giving_routes() -> Router<AppState> {
    Router::new()
        .route("/stripe/checkout", post(start_checkout))
        .route("/stripe/webhook", post(stripe_webhook))
        .route("/funds", get(list_funds))
}

/// Finance routes, mounted at `/api/admin`.
pub fn giving_admin_routes() -> Router<AppState> {
    Router::new().route(
        "/settings/gift-aid",
        get(get_gift_aid_setting).put(update_gift_aid_setting),
    )
}
