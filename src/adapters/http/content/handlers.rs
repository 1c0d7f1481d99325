//! HTTP handlers for sermons.

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::domain::foundation::SermonId;

use super::super::error::ApiError;
use super::super::state::AppState;
use super::dto::{SermonResponse, SermonsResponse};

/// GET /api/sermons
pub async fn list_sermons(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let sermons = state.list_sermons_handler().handle().await?;
    Ok(Json(SermonsResponse { sermons }))
}

/// GET /api/sermons/:id
pub async fn get_sermon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = SermonId::from_str(&id).map_err(|_| ApiError::not_found("Sermon not found."))?;
    let sermon = state.get_sermon_handler().handle(id).await?;
    Ok(Json(SermonResponse::from(sermon)))
}
