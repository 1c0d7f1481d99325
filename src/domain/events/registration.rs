//! Event registrations, check-in tokens and check-in outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::foundation::{EventId, RegistrationId, StateMachine, Timestamp, UserId};

use super::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Registered,
    CheckedIn,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "REGISTERED",
            RegistrationStatus::CheckedIn => "CHECKED_IN",
        }
    }

    pub fn parse(raw: &str) -> Option<RegistrationStatus> {
        match raw {
            "REGISTERED" => Some(RegistrationStatus::Registered),
            "CHECKED_IN" => Some(RegistrationStatus::CheckedIn),
            _ => None,
        }
    }
}

impl StateMachine for RegistrationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (RegistrationStatus::Registered, RegistrationStatus::CheckedIn)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            RegistrationStatus::Registered => vec![RegistrationStatus::CheckedIn],
            RegistrationStatus::CheckedIn => vec![],
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque token presented at the door, unique within an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckInToken(String);

impl CheckInToken {
    /// Fresh random token (32 hex chars).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Accepts a scanned or typed token; blank input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckInToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub status: RegistrationStatus,
    pub check_in_token: Option<CheckInToken>,
    pub checked_in_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Registration {
    /// New sign-up: REGISTERED with no token assigned yet.
    pub fn new(event_id: EventId, user_id: UserId) -> Self {
        Self {
            id: RegistrationId::new(),
            event_id,
            user_id,
            status: RegistrationStatus::Registered,
            check_in_token: None,
            checked_in_at: None,
            created_at: Timestamp::now(),
        }
    }
}

/// Result of a sign-up attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered(Registration),
    AlreadyRegistered,
}

impl RegistrationOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            RegistrationOutcome::Registered(_) => "Registration successful.",
            RegistrationOutcome::AlreadyRegistered => "You are already registered for this event.",
        }
    }
}

/// Whether the viewer of an event page can still sign up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationAvailability {
    /// Viewer already holds a registration.
    Registered,
    Full,
    Open,
}

impl RegistrationAvailability {
    pub fn assess(event: &Event, registered_count: i64, viewer_registered: bool) -> Self {
        if viewer_registered {
            RegistrationAvailability::Registered
        } else if !event.has_capacity_for(registered_count) {
            RegistrationAvailability::Full
        } else {
            RegistrationAvailability::Open
        }
    }
}

/// Result of matching a token at the door.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// No token supplied.
    Missing,
    /// No registration for this event carries the token.
    NotFound,
    CheckedIn(Registration),
}

impl CheckInOutcome {
    pub fn result(&self) -> &'static str {
        match self {
            CheckInOutcome::Missing => "missing",
            CheckInOutcome::NotFound => "not_found",
            CheckInOutcome::CheckedIn(_) => "checked_in",
        }
    }
}

/// Row in the recent check-ins list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInRecord {
    pub registration_id: RegistrationId,
    pub user_id: UserId,
    pub full_name: Option<String>,
    pub checked_in_at: Timestamp,
}
