//! Bearer-token authentication for the API.
//!
//! `auth_middleware` resolves the token through the `SessionValidator` port and
//! stashes the `AuthenticatedUser` in request extensions. Handlers then pick it
//! up with `RequireAuth` or `OptionalAuth`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, OriginalUri, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

use super::super::dto::ErrorResponse;

pub type AuthState = Arc<dyn SessionValidator>;

/// Requests without a token pass through anonymously; a bad token is a 401.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&request) else {
        return next.run(request).await;
    };

    match validator.validate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(AuthError::ServiceUnavailable(reason)) => {
            tracing::error!(%reason, "Session validation unavailable");
            auth_failure(
                StatusCode::SERVICE_UNAVAILABLE,
                "Authentication service unavailable",
            )
        }
        Err(AuthError::TokenExpired) => auth_failure(StatusCode::UNAUTHORIZED, "Token expired"),
        Err(AuthError::InvalidToken) => auth_failure(StatusCode::UNAUTHORIZED, "Invalid token"),
    }
}

fn bearer_token(request: &Request) -> Option<String> {
    let value = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(str::to_owned)
}

fn auth_failure(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse::new("AUTH_ERROR", message))).into_response()
}

/// Signed-in user, or a 401 carrying a login redirect back to this path.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthenticatedUser>() {
            Some(user) => Ok(RequireAuth(user.clone())),
            None => Err(AuthRejection::Unauthenticated {
                next: requested_path(parts),
            }),
        }
    }
}

/// Nested routers strip their prefix from `parts.uri`.
fn requested_path(parts: &Parts) -> String {
    match parts.extensions.get::<OriginalUri>() {
        Some(OriginalUri(uri)) => uri.path().to_string(),
        None => parts.uri.path().to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// `next` is the path to return to after signing in.
    Unauthenticated { next: String },
}

impl AuthRejection {
    pub fn login_redirect(&self) -> String {
        match self {
            AuthRejection::Unauthenticated { next } => format!("/login?next={}", next),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new("UNAUTHENTICATED", "Authentication required.")
            .with_redirect(self.login_redirect());
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::middleware;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::foundation::UserId;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            Some("test@example.com".to_string()),
            Some("Test User".to_string()),
        )
    }

    fn app(validator: MockSessionValidator) -> Router {
        let validator: AuthState = Arc::new(validator);
        Router::new()
            .route(
                "/whoami",
                get(|RequireAuth(user): RequireAuth| async move { user.id.to_string() }),
            )
            .route(
                "/public",
                get(|OptionalAuth(user): OptionalAuth| async move { user.is_some().to_string() }),
            )
            .layer(middleware::from_fn_with_state(validator, auth_middleware))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn valid_token_reaches_handler() {
        let app = app(MockSessionValidator::new().with_user("good", test_user()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header("Authorization", "Bearer good")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"user-123");
    }

    #[tokio::test]
    async fn invalid_token_is_rejected_by_middleware() {
        let app = app(MockSessionValidator::new());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/public")
                    .header("Authorization", "Bearer nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], "AUTH_ERROR");
    }

    #[tokio::test]
    async fn auth_outage_is_503() {
        let app = app(
            MockSessionValidator::new().with_error(AuthError::service_unavailable("jwks down")),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header("Authorization", "Bearer anything")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn missing_token_gets_login_redirect() {
        let app = app(MockSessionValidator::new());

        let response = app
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Authentication required.");
        assert_eq!(body["redirect"], "/login?next=/whoami");
    }

    #[tokio::test]
    async fn optional_auth_without_token_is_anonymous() {
        let app = app(MockSessionValidator::new());

        let response = app
            .oneshot(Request::builder().uri("/public").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"false");
    }

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        let mut request: Request<()> = Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(test_user());
        let (mut parts, _body) = request.into_parts();

        let RequireAuth(user) = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(user.email.as_deref(), Some("test@example.com"));
    }

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
        assert_send_sync::<RequireAuth>();
        assert_send_sync::<OptionalAuth>();
    }
}
