//! Profile aggregate: the application-side record behind an auth identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::access::Role;
use crate::domain::foundation::{AuthenticatedUser, Timestamp, UserId};

/// Pastoral status of a person in the CRM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersonStatus {
    #[default]
    Visitor,
    Member,
}

impl PersonStatus {
    /// Strict parse used for filters: only the two exact values are accepted.
    pub fn parse_filter(raw: &str) -> Option<PersonStatus> {
        match raw.trim() {
            "VISITOR" => Some(PersonStatus::Visitor),
            "MEMBER" => Some(PersonStatus::Member),
            _ => None,
        }
    }

    /// Lenient parse used for admin updates: "MEMBER" promotes, anything else is a visitor.
    pub fn from_update(raw: &str) -> PersonStatus {
        if raw.trim() == "MEMBER" {
            PersonStatus::Member
        } else {
            PersonStatus::Visitor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonStatus::Visitor => "VISITOR",
            PersonStatus::Member => "MEMBER",
        }
    }
}

impl fmt::Display for PersonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name and postal address captured for Gift Aid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSnapshot {
    pub full_name: String,
    pub address_line1: String,
    pub city: String,
    pub postcode: String,
}

/// Address fields as submitted with a request; any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressInput {
    pub full_name: Option<String>,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
}

impl AddressSnapshot {
    /// Builds a complete snapshot, preferring submitted values and falling back
    /// to what the profile already holds. Returns `None` if any field is still blank.
    pub fn resolve(input: &AddressInput, profile: &Profile) -> Option<AddressSnapshot> {
        Some(AddressSnapshot {
            full_name: pick(&input.full_name, &profile.full_name)?,
            address_line1: pick(&input.address_line1, &profile.address_line1)?,
            city: pick(&input.city, &profile.city)?,
            postcode: pick(&input.postcode, &profile.postcode)?,
        })
    }
}

fn pick(submitted: &Option<String>, stored: &Option<String>) -> Option<String> {
    non_blank(submitted).or_else(|| non_blank(stored))
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Application profile linked 1:1 to an auth identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: UserId,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub role: Role,
    pub status: PersonStatus,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
}

impl Profile {
    /// Lowest-privilege profile synthesized on first sight of an identity.
    pub fn first_sight(user: &AuthenticatedUser) -> Self {
        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            full_name: None,
            phone: None,
            address_line1: None,
            city: None,
            postcode: None,
            role: Role::Member,
            status: PersonStatus::Visitor,
            tags: Vec::new(),
            created_at: Timestamp::now(),
        }
    }

    pub fn apply_address(&mut self, address: &AddressSnapshot) {
        self.full_name = Some(address.full_name.clone());
        self.address_line1 = Some(address.address_line1.clone());
        self.city = Some(address.city.clone());
        self.postcode = Some(address.postcode.clone());
    }
}

/// Splits comma-separated tag text, trimming and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
    clean_tags(raw.split(','))
}

/// Trims and drops empty tags, preserving order.
pub fn clean_tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    tags.into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
