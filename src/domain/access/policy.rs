//! Capability-based authorization policy.
//!
//! Each protected area of the back office is a `Capability`. Whether a role
//! holds it is decided by a single exhaustive match in [`authorize`].

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::Role;

/// Something a protected route or action needs the caller to be able to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Enter the admin back office at all.
    AccessAdminPanel,
    /// Sermons, events and check-in.
    ManageContent,
    /// Finance settings such as the Gift Aid toggle.
    ManageFinance,
    /// People CRM: profile status, tags, pastoral notes.
    ManagePeople,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Capability::AccessAdminPanel => "access_admin_panel",
            Capability::ManageContent => "manage_content",
            Capability::ManageFinance => "manage_finance",
            Capability::ManagePeople => "manage_people",
        };
        f.write_str(s)
    }
}

/// The caller's role does not hold the requested capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Role {role} lacks capability {capability}")]
pub struct AccessDenied {
    pub role: Role,
    pub capability: Capability,
}

/// Returns true when `role` holds `capability`.
pub fn has_capability(role: Role, capability: Capability) -> bool {
    use Capability::*;
    use Role::*;

    match capability {
        AccessAdminPanel => matches!(role, SuperAdmin | Admin | EventsLead | Finance | Pastoral),
        ManageContent => matches!(role, SuperAdmin | Admin | EventsLead),
        ManageFinance => matches!(role, SuperAdmin | Admin | Finance),
        ManagePeople => matches!(role, SuperAdmin | Admin | Pastoral),
    }
}

/// Authorization policy: grants or denies `capability` for `role`.
pub fn authorize(role: Role, capability: Capability) -> Result<(), AccessDenied> {
    if has_capability(role, capability) {
        Ok(())
    } else {
        Err(AccessDenied { role, capability })
    }
}

/// Every role that holds `capability`, in declaration order.
pub fn roles_with(capability: Capability) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|role| has_capability(*role, capability))
        .collect()
}
