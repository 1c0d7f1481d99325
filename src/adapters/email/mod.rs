//! Transactional email adapters.
//!
//! - `ConsoleEmailNotifier` logs each message through `tracing` (local runs)
//! - `ResendEmailNotifier` delivers through the Resend HTTP API

mod console;
mod message;
mod resend;

pub use console::ConsoleEmailNotifier;
pub use message::EmailMessage;
pub use resend::{ResendConfig, ResendEmailNotifier};
