//! HTTP handlers for the people CRM.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::people::{AddPersonNoteCommand, UpdatePersonCommand};
use crate::domain::access::Capability;
use crate::domain::foundation::{AuthenticatedUser, UserId};
use crate::domain::people::{LeadSubmission, PeopleFilter};

use super::super::account::ProfileResponse;
use super::super::dto::MessageResponse;
use super::super::error::ApiError;
use super::super::extract::JsonBody;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    AddNoteRequest, NoteResponse, PeopleQuery, PeopleResponse, PersonResponse,
    UpdatePersonRequest,
};

async fn gate(state: &AppState, user: &AuthenticatedUser) -> Result<UserId, ApiError> {
    let gate = state
        .require_role_handler()
        .handle(user, Capability::ManagePeople)
        .await?;
    Ok(gate.user.id)
}

fn person_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::new(raw).map_err(|_| ApiError::not_found("Person not found."))
}

/// GET /api/admin/people
pub async fn search_people(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<PeopleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    gate(&state, &user).await?;

    let filter = PeopleFilter::from_raw(
        query.q.as_deref(),
        query.status.as_deref(),
        query.tag.as_deref(),
    );
    let result = state.search_people_handler().handle(filter).await?;

    Ok(Json(PeopleResponse {
        people: result.people.into_iter().map(ProfileResponse::from).collect(),
        available_tags: result.available_tags,
    }))
}

/// GET /api/admin/people/:user_id
pub async fn get_person(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    gate(&state, &user).await?;

    let detail = state.get_person_handler().handle(&person_id(&user_id)?).await?;
    Ok(Json(PersonResponse {
        profile: detail.profile.into(),
        notes: detail.notes.into_iter().map(NoteResponse::from).collect(),
    }))
}

/// PUT /api/admin/people/:user_id
pub async fn update_person(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(user_id): Path<String>,
    JsonBody(request): JsonBody<UpdatePersonRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = gate(&state, &user).await?;

    let cmd = UpdatePersonCommand {
        user_id: person_id(&user_id)?,
        status: request.status,
        tags: request.tags,
        updated_by: admin,
    };
    state.update_person_handler().handle(cmd).await?;
    Ok(Json(MessageResponse::new("Person updated.")))
}

/// POST /api/admin/people/:user_id/notes
pub async fn add_note(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(user_id): Path<String>,
    JsonBody(request): JsonBody<AddNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = gate(&state, &user).await?;

    let cmd = AddPersonNoteCommand {
        user_id: person_id(&user_id)?,
        note: request.note,
        created_by: admin,
    };
    let note = state.add_note_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(NoteResponse::from(note))))
}

/// POST /api/leads - Public "New here" form
pub async fn submit_lead(
    State(state): State<AppState>,
    JsonBody(submission): JsonBody<LeadSubmission>,
) -> Result<impl IntoResponse, ApiError> {
    state.submit_lead_handler().handle(submission).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Thank you. We have received your details.")),
    ))
}
