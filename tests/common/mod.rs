//! Shared harness for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;

use church_hub::adapters::auth::MockSessionValidator;
use church_hub::adapters::http::{api_router, AppState, HttpSettings};
use church_hub::adapters::memory::{InMemoryStore, RecordingNotifier};
use church_hub::application::handlers::giving::CheckoutSettings;
use church_hub::domain::foundation::{AuthenticatedUser, UserId};
use church_hub::domain::people::Profile;
use church_hub::ports::PaymentProvider;

pub const SITE_URL: &str = "https://stmarys.example.org";

pub struct TestApp {
    pub store: Arc<InMemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub router: Router,
}

impl TestApp {
    /// Router over an empty store. `members` are accepted as bearer tokens
    /// `<id>-token` for user `<id>`.
    pub fn new(payment_provider: Arc<dyn PaymentProvider>, members: &[&str]) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let notifier = Arc::new(RecordingNotifier::new());

        let validator = members.iter().fold(MockSessionValidator::new(), |v, id| {
            v.with_member(format!("{}-token", id), id)
        });

        let state = AppState::in_memory(
            store.clone(),
            notifier.clone(),
            payment_provider,
            Arc::new(validator),
            CheckoutSettings::new(SITE_URL, "gbp"),
        );

        Self {
            store,
            notifier,
            router: api_router(state, &HttpSettings::default()),
        }
    }

    pub fn add_member(&self, id: &str, email: Option<&str>) {
        self.store.add_profile(Profile::first_sight(&AuthenticatedUser::new(
            UserId::new(id).unwrap(),
            email.map(str::to_string),
            None,
        )));
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        use tower::ServiceExt;
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn post_json(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
