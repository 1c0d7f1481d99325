//! Stripe payment adapters.
//!
//! - `StripePaymentAdapter` - hosted Checkout Sessions and webhook verification
//! - `MockPaymentProvider` - configurable stand-in for tests

mod mock_payment_provider;
mod stripe_adapter;
mod webhook_types;

pub use mock_payment_provider::MockPaymentProvider;
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
pub use webhook_types::{SignatureHeader, SignatureParseError};
