//! Account DTOs.

use serde::Serialize;

use crate::domain::access::Role;
use crate::domain::people::{PersonStatus, Profile};

/// A profile as returned to members and the CRM.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub role: Role,
    pub status: PersonStatus,
    pub tags: Vec<String>,
    /// ISO 8601.
    pub created_at: String,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            user_id: p.user_id.to_string(),
            email: p.email,
            full_name: p.full_name,
            phone: p.phone,
            address_line1: p.address_line1,
            city: p.city,
            postcode: p.postcode,
            role: p.role,
            status: p.status,
            tags: p.tags,
            created_at: p.created_at.to_rfc3339(),
        }
    }
}
