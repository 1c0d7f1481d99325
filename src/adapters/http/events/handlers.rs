//! HTTP handlers for event endpoints.

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::events::{
    AssignCheckInTokenCommand, CheckInByTokenCommand, RegisterForEventCommand,
};
use crate::domain::access::Capability;
use crate::domain::events::CheckInOutcome;
use crate::domain::foundation::{EventId, RegistrationId};

use super::super::dto::MessageResponse;
use super::super::error::ApiError;
use super::super::extract::JsonBody;
use super::super::middleware::{OptionalAuth, RequireAuth};
use super::super::state::AppState;
use super::dto::{
    CheckInRequest, CheckInResponse, CheckInsResponse, EventsResponse, MyRegistrationResponse,
    MyRegistrationsResponse, RegistrationResponse,
};

/// Ids that are not UUIDs cannot name an event.
fn event_id(raw: &str) -> Result<EventId, ApiError> {
    EventId::from_str(raw).map_err(|_| ApiError::not_found("Event not found."))
}

fn registration_id(raw: &str) -> Result<RegistrationId, ApiError> {
    RegistrationId::from_str(raw).map_err(|_| ApiError::not_found("Registration not found."))
}

/// GET /api/events
pub async fn list_events(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let events = state.list_events_handler().handle().await?;
    Ok(Json(EventsResponse { events }))
}

/// GET /api/events/:id - availability is included when signed in
pub async fn get_event(
    State(state): State<AppState>,
    OptionalAuth(viewer): OptionalAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state
        .get_event_handler()
        .handle(event_id(&id)?, viewer.as_ref().map(|u| &u.id))
        .await?;
    Ok(Json(detail))
}

/// POST /api/events/:id/register
pub async fn register(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RegisterForEventCommand {
        user,
        event_id: event_id(&id)?,
    };

    let outcome = state.register_handler().handle(cmd).await?;
    Ok(Json(MessageResponse::new(outcome.message())))
}

/// GET /api/my/registrations
pub async fn my_registrations(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let upcoming = state.my_registrations_handler().handle(&user.id).await?;
    Ok(Json(MyRegistrationsResponse {
        registrations: upcoming.into_iter().map(MyRegistrationResponse::from).collect(),
    }))
}

/// POST /api/admin/events/:id/check-in
pub async fn check_in(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<CheckInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let gate = state
        .require_role_handler()
        .handle(&user, Capability::ManageContent)
        .await?;

    let cmd = CheckInByTokenCommand {
        event_id: event_id(&id)?,
        token: request.token,
        checked_in_by: gate.user.id,
    };
    let outcome = state.check_in_handler().handle(cmd).await?;

    let status = match outcome {
        CheckInOutcome::Missing => StatusCode::BAD_REQUEST,
        CheckInOutcome::NotFound => StatusCode::NOT_FOUND,
        CheckInOutcome::CheckedIn(_) => StatusCode::OK,
    };
    Ok((status, Json(CheckInResponse::from(outcome))))
}

/// GET /api/admin/events/:id/check-ins
pub async fn recent_check_ins(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .require_role_handler()
        .handle(&user, Capability::ManageContent)
        .await?;

    let recent = state.recent_check_ins_handler().handle(event_id(&id)?).await?;
    Ok(Json(CheckInsResponse {
        event: recent.event,
        check_ins: recent.check_ins,
    }))
}

/// POST /api/admin/registrations/:id/check-in-token
pub async fn assign_check_in_token(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let gate = state
        .require_role_handler()
        .handle(&user, Capability::ManageContent)
        .await?;

    let cmd = AssignCheckInTokenCommand {
        registration_id: registration_id(&id)?,
        assigned_by: gate.user.id,
    };
    let registration = state.assign_token_handler().handle(cmd).await?;
    Ok(Json(RegistrationResponse { registration }))
}
