//! HTTP handlers for giving endpoints.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::giving::{
    ReconcilePaymentWebhookCommand, StartCheckoutCommand, UpdateGiftAidSettingCommand,
};
use crate::domain::access::Capability;

use super::super::error::ApiError;
use super::super::extract::JsonBody;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{CheckoutRequest, CheckoutResponse, FundsResponse, GiftAidSettingBody, WebhookAck};

/// POST /api/stripe/checkout - Start a donation checkout
pub async fn start_checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    JsonBody(request): JsonBody<CheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = StartCheckoutCommand {
        user,
        fund_id: request.fund_id.clone(),
        amount: request.amount_selection(),
        gift_aid: request.gift_aid,
        declaration_accepted: request.declaration_accepted,
        address: request.address(),
    };

    let result = state.start_checkout_handler().handle(cmd).await?;
    Ok(Json(CheckoutResponse { url: result.url }))
}

/// POST /api/stripe/webhook - Reconcile a payment webhook
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = ReconcilePaymentWebhookCommand {
        payload: body.to_vec(),
        signature,
    };
    state.webhook_handler().handle(cmd).await?;

    Ok(Json(WebhookAck { received: true }))
}

/// GET /api/funds - Give form data
pub async fn list_funds(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let funds_handler = state.list_funds_handler();
    let setting_handler = state.get_gift_aid_setting_handler();
    let (funds, gift_aid) =
        futures::try_join!(funds_handler.handle(), setting_handler.handle())?;

    Ok(Json(FundsResponse {
        funds,
        gift_aid_enabled: gift_aid.enabled,
    }))
}

/// GET /api/admin/settings/gift-aid
pub async fn get_gift_aid_setting(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    state
        .require_role_handler()
        .handle(&user, Capability::ManageFinance)
        .await?;

    let setting = state.get_gift_aid_setting_handler().handle().await?;
    Ok(Json(GiftAidSettingBody {
        enabled: setting.enabled,
    }))
}

/// PUT /api/admin/settings/gift-aid
pub async fn update_gift_aid_setting(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    JsonBody(body): JsonBody<GiftAidSettingBody>,
) -> Result<impl IntoResponse, ApiError> {
    let gate = state
        .require_role_handler()
        .handle(&user, Capability::ManageFinance)
        .await?;

    let cmd = UpdateGiftAidSettingCommand {
        enabled: body.enabled,
        updated_by: gate.user.id,
    };
    let setting = state.update_gift_aid_setting_handler().handle(cmd).await?;
    Ok(Json(GiftAidSettingBody {
        enabled: setting.enabled,
    }))
}
