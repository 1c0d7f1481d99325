//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, error types, authentication types and the
//! state machine trait shared by every feature module.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{
    DeclarationId, DonationId, EventId, FundId, LeadId, NoteId, RegistrationId, SermonId, UserId,
};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
