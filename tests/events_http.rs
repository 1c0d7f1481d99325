//! Event registration through the assembled router.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use church_hub::adapters::stripe::MockPaymentProvider;
use church_hub::domain::events::{Event, Registration};
use church_hub::domain::foundation::{EventId, Timestamp, UserId};

use common::{body_json, post_json, TestApp};

fn app() -> TestApp {
    TestApp::new(
        Arc::new(MockPaymentProvider::new()),
        &["grace", "hopper"],
    )
}

fn supper(app: &TestApp, capacity: Option<i32>) -> EventId {
    let event = Event {
        id: EventId::new(),
        title: "Harvest Supper".to_string(),
        description: Some("Bring a dish to share".to_string()),
        location: Some("Church Hall".to_string()),
        starts_at: Timestamp::from_unix_seconds(4_102_444_800).unwrap(),
        ends_at: None,
        capacity,
        is_published: true,
    };
    let id = event.id;
    app.store.add_event(event);
    id
}

fn register_uri(event_id: EventId) -> String {
    format!("/api/events/{}/register", event_id)
}

#[tokio::test]
async fn full_event_returns_409_and_writes_nothing() {
    let app = app();
    let event_id = supper(&app, Some(1));
    app.store
        .add_registration(Registration::new(event_id, UserId::new("hopper").unwrap()));

    let response = app
        .send(post_json(&register_uri(event_id), Some("grace-token"), json!({})))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "Event capacity reached.");
    assert_eq!(app.store.registrations().len(), 1);
}

#[tokio::test]
async fn unlimited_capacity_always_admits() {
    let app = app();
    let event_id = supper(&app, None);
    for n in 0..200 {
        app.store.add_registration(Registration::new(
            event_id,
            UserId::new(format!("member-{}", n)).unwrap(),
        ));
    }

    let response = app
        .send(post_json(&register_uri(event_id), Some("grace-token"), json!({})))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.store.registrations().len(), 201);
}

#[tokio::test]
async fn unauthenticated_register_is_401_without_a_row() {
    let app = app();
    let event_id = supper(&app, Some(10));

    let response = app
        .send(post_json(&register_uri(event_id), None, json!({})))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(
        body["redirect"],
        format!("/login?next=/api/events/{}/register", event_id)
    );
    assert!(app.store.registrations().is_empty());
}

#[tokio::test]
async fn registering_twice_is_idempotent() {
    let app = app();
    let event_id = supper(&app, Some(10));

    let first = app
        .send(post_json(&register_uri(event_id), Some("grace-token"), json!({})))
        .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .send(post_json(&register_uri(event_id), Some("grace-token"), json!({})))
        .await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(
        body_json(second).await["message"],
        "You are already registered for this event."
    );
    assert_eq!(app.store.registrations().len(), 1);
}

#[tokio::test]
async fn last_seat_goes_to_first_member() {
    let app = app();
    let event_id = supper(&app, Some(1));

    let first = app
        .send(post_json(&register_uri(event_id), Some("grace-token"), json!({})))
        .await;
    let second = app
        .send(post_json(&register_uri(event_id), Some("hopper-token"), json!({})))
        .await;

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let registrations = app.store.registrations();
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0].user_id.as_str(), "grace");
}
