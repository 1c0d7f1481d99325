//! Request body extraction with JSON error responses.

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

pub const INVALID_BODY: &str = "Invalid request body.";

/// `Json<T>` whose rejection is an `ApiError` 400 instead of axum's plain-text
/// 415/422.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
        ApiError::bad_request(INVALID_BODY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize)]
    struct Note {
        note: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/notes",
            post(|JsonBody(body): JsonBody<Note>| async move { body.note }),
        )
    }

    async fn send(content_type: Option<&str>, body: &'static str) -> (StatusCode, Vec<u8>) {
        let mut request = axum::http::Request::builder().method("POST").uri("/notes");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let response = app()
            .oneshot(request.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn well_formed_body_reaches_handler() {
        let (status, body) = send(Some("application/json"), r#"{"note":"hello"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"hello");
    }

    #[tokio::test]
    async fn wrong_types_missing_content_type_and_bad_syntax_are_json_400s() {
        for (content_type, body) in [
            (Some("application/json"), r#"{"note":42}"#),
            (None, r#"{"note":"hello"}"#),
            (Some("application/json"), r#"{"note":"#),
        ] {
            let (status, bytes) = send(content_type, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(json["error"], INVALID_BODY);
            assert_eq!(json["code"], "VALIDATION_FAILED");
        }
    }
}
