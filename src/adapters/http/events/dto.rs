//! Event DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::events::{CheckInOutcome, CheckInRecord, Event, Registration};
use crate::ports::UpcomingRegistration;

#[derive(Debug, Clone, Serialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MyRegistrationResponse {
    pub registration: Registration,
    pub event: Event,
}

impl From<UpcomingRegistration> for MyRegistrationResponse {
    fn from(u: UpcomingRegistration) -> Self {
        Self {
            registration: u.registration,
            event: u.event,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MyRegistrationsResponse {
    pub registrations: Vec<MyRegistrationResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckInRequest {
    pub token: String,
}

/// Door check-in result: `missing`, `not_found` or `checked_in`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInResponse {
    pub result: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<Registration>,
}

impl From<CheckInOutcome> for CheckInResponse {
    fn from(outcome: CheckInOutcome) -> Self {
        let result = outcome.result();
        let registration = match outcome {
            CheckInOutcome::CheckedIn(registration) => Some(registration),
            CheckInOutcome::Missing | CheckInOutcome::NotFound => None,
        };
        Self {
            result,
            registration,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckInsResponse {
    pub event: Event,
    pub check_ins: Vec<CheckInRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationResponse {
    pub registration: Registration,
}
