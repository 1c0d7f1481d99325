//! Giving handlers.
//!
//! ## Commands
//! - Start a hosted checkout for a one-off donation
//! - Reconcile payment webhooks into donation records
//! - Toggle Gift Aid (finance)
//!
//! ## Queries
//! - Gift Aid toggle state
//! - Active funds

mod gift_aid_setting;
mod list_funds;
mod reconcile_payment_webhook;
mod start_checkout;

pub use gift_aid_setting::{
    GetGiftAidSettingHandler, UpdateGiftAidSettingCommand, UpdateGiftAidSettingHandler,
};
pub use list_funds::ListFundsHandler;
pub use reconcile_payment_webhook::{
    ReconcileOutcome, ReconcilePaymentWebhookCommand, ReconcilePaymentWebhookHandler,
};
pub use start_checkout::{
    CheckoutSettings, StartCheckoutCommand, StartCheckoutHandler, StartCheckoutResult,
};
