//! Events: sign-ups with capacity, check-in tokens and door check-in.

mod errors;
mod event;
mod registration;

pub use errors::EventError;
pub use event::Event;
pub use registration::{
    CheckInOutcome, CheckInRecord, CheckInToken, Registration, RegistrationAvailability,
    RegistrationOutcome, RegistrationStatus,
};
