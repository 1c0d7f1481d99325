//! Church Hub - church administration and member engagement service.
//!
//! One-off giving with Gift Aid through Stripe hosted checkout, event
//! registration with door check-in, a people CRM and a sermon library,
//! served as a JSON API.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
