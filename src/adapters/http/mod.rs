//! HTTP adapters - REST API implementations.
//!
//! Each feature has its own router, DTOs and handlers. All of them share one
//! `AppState` and one `ApiError` mapping.

pub mod account;
pub mod content;
pub mod dashboard;
pub mod dto;
pub mod error;
pub mod events;
pub mod extract;
pub mod giving;
pub mod middleware;
pub mod people;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use extract::JsonBody;
pub use router::{api_router, HttpSettings};
pub use state::AppState;
