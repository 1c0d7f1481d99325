//! HTTP handlers for the admin dashboard.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::domain::access::Capability;

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;

/// GET /api/admin/summary
pub async fn admin_summary(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    state
        .require_role_handler()
        .handle(&user, Capability::AccessAdminPanel)
        .await?;

    let summary = state.admin_summary_handler().handle().await?;
    Ok(Json(summary))
}
