//! Maps feature errors to HTTP responses.
//!
//! Every handler returns `Result<_, ApiError>`; the `From` impls let `?` lift
//! feature errors straight out of the application layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::access::{AccessError, DENIED_REDIRECT};
use crate::domain::events::EventError;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::giving::GivingError;
use crate::domain::people::PeopleError;

use super::dto::ErrorResponse;

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug)]
pub enum ApiError {
    Giving(GivingError),
    Events(EventError),
    People(PeopleError),
    Access(AccessError),
    Domain(DomainError),
    /// Path parameter that cannot name an existing resource.
    NotFound(&'static str),
    BadRequest(String),
}

impl ApiError {
    pub fn not_found(message: &'static str) -> Self {
        ApiError::NotFound(message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Giving(e) => match e {
                GivingError::FundNotFound => StatusCode::NOT_FOUND,
                GivingError::AlreadyFinalised { .. } => StatusCode::CONFLICT,
                GivingError::CheckoutFailed(_)
                | GivingError::CheckoutUrlMissing
                | GivingError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
                GivingError::InvalidAmount
                | GivingError::FundRequired
                | GivingError::GiftAidDisabled
                | GivingError::DeclarationRequired
                | GivingError::AddressIncomplete
                | GivingError::WebhookNotConfigured
                | GivingError::InvalidWebhookSignature
                | GivingError::OwnerUnresolved
                | GivingError::InvalidSessionAmount
                | GivingError::PersistFailed(_) => StatusCode::BAD_REQUEST,
            },
            ApiError::Events(e) => match e {
                EventError::NotFound(_) | EventError::RegistrationNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                EventError::CapacityReached(_) => StatusCode::CONFLICT,
                EventError::RegistrationFailed(_) => StatusCode::BAD_REQUEST,
                EventError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::People(e) => match e {
                PeopleError::NotFound(_) => StatusCode::NOT_FOUND,
                PeopleError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
                PeopleError::Infrastructure(_) | PeopleError::SubmissionFailed(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Access(e) => match e {
                AccessError::Forbidden(_) => StatusCode::FORBIDDEN,
                AccessError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Domain(e) => domain_status(e.code),
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Giving(e) => ErrorResponse::new(e.code().to_string(), e.message()),
            ApiError::Events(e) => ErrorResponse::new(e.code().to_string(), e.message()),
            ApiError::People(e) => ErrorResponse::new(e.code().to_string(), e.message()),
            ApiError::Access(e @ AccessError::Forbidden(_)) => {
                ErrorResponse::new(e.code().to_string(), e.message()).with_redirect(DENIED_REDIRECT)
            }
            ApiError::Access(e) => ErrorResponse::new(e.code().to_string(), e.message()),
            ApiError::Domain(e) => {
                let message = if domain_status(e.code).is_server_error() {
                    GENERIC_FAILURE.to_string()
                } else {
                    e.message.clone()
                };
                ErrorResponse::new(e.code.to_string(), message)
            }
            ApiError::NotFound(message) => ErrorResponse::new("NOT_FOUND", *message),
            ApiError::BadRequest(message) => {
                ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), message.clone())
            }
        }
    }
}

fn domain_status(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        ErrorCode::ProfileNotFound
        | ErrorCode::FundNotFound
        | ErrorCode::DonationNotFound
        | ErrorCode::EventNotFound
        | ErrorCode::RegistrationNotFound
        | ErrorCode::SermonNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStateTransition
        | ErrorCode::CapacityReached
        | ErrorCode::UniqueViolation => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::PaymentProviderError
        | ErrorCode::NotificationError
        | ErrorCode::DatabaseError
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

impl From<GivingError> for ApiError {
    fn from(err: GivingError) -> Self {
        ApiError::Giving(err)
    }
}

impl From<EventError> for ApiError {
    fn from(err: EventError) -> Self {
        ApiError::Events(err)
    }
}

impl From<PeopleError> for ApiError {
    fn from(err: PeopleError) -> Self {
        ApiError::People(err)
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        ApiError::Access(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::access::{AccessDenied, Capability, Role};
    use crate::domain::foundation::EventId;
    use crate::domain::giving::DonationStatus;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn checkout_validation_is_400_with_message() {
        let (status, body) = render(GivingError::DeclarationRequired.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Gift Aid declaration consent is required.");
    }

    #[tokio::test]
    async fn finalised_donation_is_409() {
        let err = GivingError::already_finalised(DonationStatus::Succeeded, DonationStatus::Expired);
        let (status, _) = render(err.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn provider_failure_hides_reason() {
        let (status, body) = render(GivingError::checkout_failed("sk_live leaked?").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Unable to start checkout right now.");
    }

    #[tokio::test]
    async fn capacity_is_409() {
        let (status, body) = render(EventError::capacity_reached(EventId::new()).into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Event capacity reached.");
    }

    #[tokio::test]
    async fn forbidden_carries_account_redirect() {
        let denied = AccessDenied {
            role: Role::Member,
            capability: Capability::ManageFinance,
        };
        let (status, body) = render(AccessError::from(denied).into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["redirect"], "/account");
    }

    #[tokio::test]
    async fn database_errors_are_generic_500s() {
        let err = DomainError::database("insert", "relation does not exist");
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn unparseable_path_id_is_404() {
        let (status, body) = render(ApiError::not_found("Event not found.")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
