//! Application roles stored on a profile.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role held by a profile.
///
/// Stored as an upper-case string. Anything unrecognised reads back as
/// `Member`, the lowest-privilege role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Member,
    Admin,
    SuperAdmin,
    EventsLead,
    Finance,
    Pastoral,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Member,
        Role::Admin,
        Role::SuperAdmin,
        Role::EventsLead,
        Role::Finance,
        Role::Pastoral,
    ];

    /// Parses a stored role value, failing closed to `Member`.
    pub fn normalize(raw: Option<&str>) -> Role {
        let Some(raw) = raw else {
            return Role::Member;
        };

        match raw.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Role::Admin,
            "SUPER_ADMIN" => Role::SuperAdmin,
            "EVENTS_LEAD" => Role::EventsLead,
            "FINANCE" => Role::Finance,
            "PASTORAL" => Role::Pastoral,
            _ => Role::Member,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "MEMBER",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::EventsLead => "EVENTS_LEAD",
            Role::Finance => "FINANCE",
            Role::Pastoral => "PASTORAL",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
