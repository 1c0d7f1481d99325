//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations, grouped by
//! feature. Each holds the ports it needs as `Arc<dyn Port>`.

pub mod content;
pub mod dashboard;
pub mod events;
pub mod giving;
pub mod identity;
pub mod people;
