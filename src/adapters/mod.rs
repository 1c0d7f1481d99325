//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - OIDC token validation and a mock validator
//! - `email` - Resend and console notifiers
//! - `http` - axum routers, extractors and error mapping
//! - `memory` - in-memory store used by tests and local runs
//! - `postgres` - sqlx repositories
//! - `stripe` - hosted checkout and webhook verification

pub mod auth;
pub mod email;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod stripe;
