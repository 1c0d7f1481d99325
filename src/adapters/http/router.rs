//! Assembles the full API router.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::account::account_routes;
use super::content::content_routes;
use super::dashboard::dashboard_admin_routes;
use super::events::{events_admin_routes, events_routes};
use super::giving::{giving_admin_routes, giving_routes};
use super::middleware::auth_middleware;
use super::people::{people_admin_routes, people_routes};
use super::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Cross-cutting HTTP settings taken from server config.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    /// Allowed browser origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Every API route with auth, tracing, CORS, timeout and request ids applied.
///
/// ```text
/// /health
/// /api/account
/// /api/{stripe,funds,events,my,sermons,leads}/...
/// /api/admin/{summary,events,registrations,settings,people}/...
/// ```
pub fn api_router(state: AppState, settings: &HttpSettings) -> Router {
    let admin = Router::new()
        .merge(dashboard_admin_routes())
        .merge(events_admin_routes())
        .merge(giving_admin_routes())
        .merge(people_admin_routes());

    let api = Router::new()
        .nest("/account", account_routes())
        .nest("/admin", admin)
        .merge(giving_routes())
        .merge(events_routes())
        .merge(content_routes())
        .merge(people_routes());

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    if parsed.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(parsed)
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
