//! Give form and Stripe webhook flows through the assembled router.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use church_hub::adapters::stripe::{MockPaymentProvider, StripeConfig, StripePaymentAdapter};
use church_hub::domain::foundation::{FundId, UserId};
use church_hub::domain::giving::{Donation, DonationAmount, DonationStatus, Fund, GIFT_AID_SETTING_KEY};

use common::{body_json, post_json, TestApp};

const WEBHOOK_SECRET: &str = "whsec_integration";

// =============================================================================
// Test Infrastructure
// =============================================================================

fn general_fund(app: &TestApp) -> FundId {
    let fund = Fund {
        id: FundId::new(),
        name: "General Fund".to_string(),
        description: None,
        is_active: true,
    };
    let id = fund.id;
    app.store.add_fund(fund);
    id
}

fn checkout_app() -> (TestApp, MockPaymentProvider) {
    let provider = MockPaymentProvider::new();
    let app = TestApp::new(Arc::new(provider.clone()), &["donor"]);
    (app, provider)
}

fn sign(payload: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp();
    let mut mac = Hmac::<Sha256>::new_from_slice(WEBHOOK_SECRET.as_bytes()).unwrap();
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    let hex: String = mac
        .finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();
    format!("t={},v1={}", timestamp, hex)
}

fn webhook_request(payload: &str, signature: Option<String>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/stripe/webhook")
        .header("Content-Type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("Stripe-Signature", signature);
    }
    builder.body(Body::from(payload.to_string())).unwrap()
}

fn paid_session_event(event_id: &str, session_id: &str, fund_id: FundId) -> String {
    json!({
        "id": event_id,
        "type": "checkout.session.completed",
        "created": chrono::Utc::now().timestamp(),
        "livemode": false,
        "data": {"object": {
            "id": session_id,
            "object": "checkout.session",
            "payment_status": "paid",
            "payment_intent": "pi_123",
            "amount_total": 2500,
            "currency": "gbp",
            "metadata": {"user_id": "donor", "fund_id": fund_id.to_string()}
        }}
    })
    .to_string()
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn custom_amount_below_minimum_is_rejected_before_checkout() {
    let (app, provider) = checkout_app();
    let fund_id = general_fund(&app);

    let response = app
        .send(post_json(
            "/api/stripe/checkout",
            Some("donor-token"),
            json!({
                "fundId": fund_id.to_string(),
                "amountMode": "custom",
                "customAmountPounds": "0.50"
            }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid donation amount.");
    assert!(provider.checkout_requests().is_empty());
    assert!(app.store.donations().is_empty());
}

#[tokio::test]
async fn custom_pounds_become_pence_on_the_hosted_session() {
    let (app, provider) = checkout_app();
    let fund_id = general_fund(&app);

    let response = app
        .send(post_json(
            "/api/stripe/checkout",
            Some("donor-token"),
            json!({
                "fundId": fund_id.to_string(),
                "amountMode": "custom",
                "customAmountPounds": "250.00"
            }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["url"].as_str().unwrap().starts_with("https://checkout.stripe.com/"));

    let requests = provider.checkout_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount_pence, 25000);
    assert_eq!(requests[0].product_name, "Donation: General Fund");

    let donations = app.store.donations();
    assert_eq!(donations.len(), 1);
    assert_eq!(donations[0].amount.pence(), 25000);
    assert_eq!(donations[0].status, DonationStatus::Pending);
}

#[tokio::test]
async fn gift_aid_without_declaration_is_rejected() {
    let (app, provider) = checkout_app();
    let fund_id = general_fund(&app);
    app.store.set_setting(GIFT_AID_SETTING_KEY, json!({"enabled": true}));

    let response = app
        .send(post_json(
            "/api/stripe/checkout",
            Some("donor-token"),
            json!({
                "fundId": fund_id.to_string(),
                "amountMode": "preset",
                "presetAmountPence": 2500,
                "giftAid": true,
                "declarationAccepted": false,
                "fullName": "Ada Lovelace",
                "addressLine1": "1 Church Lane",
                "city": "York",
                "postcode": "YO1 7HH"
            }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Gift Aid declaration consent is required."
    );
    assert!(app.store.declarations().is_empty());
    assert!(provider.checkout_requests().is_empty());
}

#[tokio::test]
async fn checkout_requires_sign_in() {
    let (app, provider) = checkout_app();
    let fund_id = general_fund(&app);

    let response = app
        .send(post_json(
            "/api/stripe/checkout",
            None,
            json!({"fundId": fund_id.to_string(), "amountMode": "preset", "presetAmountPence": 1000}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(provider.checkout_requests().is_empty());
}

#[tokio::test]
async fn preset_amount_sent_as_text_is_accepted() {
    let (app, provider) = checkout_app();
    let fund_id = general_fund(&app);

    let response = app
        .send(post_json(
            "/api/stripe/checkout",
            Some("donor-token"),
            json!({"fundId": fund_id.to_string(), "amountMode": "preset", "presetAmountPence": "500"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(provider.checkout_requests()[0].amount_pence, 500);
}

#[tokio::test]
async fn non_numeric_preset_is_an_invalid_amount() {
    let (app, provider) = checkout_app();
    let fund_id = general_fund(&app);

    let response = app
        .send(post_json(
            "/api/stripe/checkout",
            Some("donor-token"),
            json!({"fundId": fund_id.to_string(), "amountMode": "preset", "presetAmountPence": "five"}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid donation amount.");
    assert!(provider.checkout_requests().is_empty());
}

#[tokio::test]
async fn malformed_checkout_body_is_a_json_400() {
    let (app, provider) = checkout_app();

    let mismatched = app
        .send(post_json(
            "/api/stripe/checkout",
            Some("donor-token"),
            json!({"amountMode": "preset", "giftAid": "yes"}),
        ))
        .await;
    assert_eq!(mismatched.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(mismatched).await["error"], "Invalid request body.");

    let no_content_type = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/stripe/checkout")
                .header("Authorization", "Bearer donor-token")
                .body(Body::from(r#"{"amountMode":"preset"}"#))
                .unwrap(),
        )
        .await;
    assert_eq!(no_content_type.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(no_content_type).await["error"], "Invalid request body.");

    assert!(provider.checkout_requests().is_empty());
}

// =============================================================================
// Webhook
// =============================================================================

fn webhook_app() -> (TestApp, FundId) {
    let adapter = StripePaymentAdapter::new(StripeConfig::new(
        "sk_test_integration",
        Some(WEBHOOK_SECRET.to_string()),
    ));
    let app = TestApp::new(Arc::new(adapter), &[]);
    app.add_member("donor", Some("donor@example.org"));
    let fund_id = general_fund(&app);
    app.store.add_donation(Donation::pending(
        UserId::new("donor").unwrap(),
        fund_id,
        DonationAmount::from_provider(2500).unwrap(),
        "gbp",
        "cs_live_1",
        None,
    ));
    (app, fund_id)
}

#[tokio::test]
async fn replayed_paid_event_sends_exactly_one_receipt() {
    let (app, fund_id) = webhook_app();
    let payload = paid_session_event("evt_1", "cs_live_1", fund_id);

    for _ in 0..2 {
        let response = app.send(webhook_request(&payload, Some(sign(&payload)))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["received"], true);
    }

    let receipts = app.notifier.receipts();
    assert_eq!(receipts.len(), 1);
    assert_eq!(receipts[0].to, "donor@example.org");
    assert_eq!(receipts[0].amount_pence, 2500);
    assert_eq!(receipts[0].fund_name, "General Fund");

    let donations = app.store.donations();
    assert_eq!(donations.len(), 1);
    assert_eq!(donations[0].status, DonationStatus::Succeeded);
    assert_eq!(donations[0].payment_intent_id.as_deref(), Some("pi_123"));
}

#[tokio::test]
async fn expiry_after_success_conflicts_and_keeps_status() {
    let (app, fund_id) = webhook_app();
    let paid = paid_session_event("evt_1", "cs_live_1", fund_id);
    app.send(webhook_request(&paid, Some(sign(&paid)))).await;

    let expired = json!({
        "id": "evt_2",
        "type": "checkout.session.expired",
        "created": chrono::Utc::now().timestamp(),
        "data": {"object": {"id": "cs_live_1", "metadata": {}}}
    })
    .to_string();
    let response = app.send(webhook_request(&expired, Some(sign(&expired)))).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.store.donations()[0].status, DonationStatus::Succeeded);
    assert_eq!(app.notifier.receipts().len(), 1);
}

#[tokio::test]
async fn bad_or_missing_signature_writes_nothing() {
    let (app, fund_id) = webhook_app();
    let payload = paid_session_event("evt_1", "cs_live_1", fund_id);

    let forged = app
        .send(webhook_request(&payload, Some("t=1,v1=deadbeef".to_string())))
        .await;
    assert_eq!(forged.status(), StatusCode::BAD_REQUEST);

    let unsigned = app.send(webhook_request(&payload, None)).await;
    assert_eq!(unsigned.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.store.donations()[0].status, DonationStatus::Pending);
    assert!(app.notifier.receipts().is_empty());
}
