//! Domain layer: pure types and rules for the church hub.
//!
//! Nothing in here performs I/O; ports and adapters supply persistence,
//! payments, identity and notifications.

pub mod access;
pub mod content;
pub mod events;
pub mod foundation;
pub mod giving;
pub mod people;
