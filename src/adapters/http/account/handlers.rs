//! HTTP handlers for account endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::ProfileResponse;

/// GET /api/account - Caller's profile
pub async fn get_account(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state.ensure_profile_handler().handle(&user).await?;
    Ok(Json(ProfileResponse::from(profile)))
}
