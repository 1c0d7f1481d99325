//! Visitor leads from the public "New here" form.

use serde::Deserialize;

use crate::domain::foundation::{LeadId, Timestamp};

use super::PeopleError;

pub const LEAD_STATUS_NEW: &str = "NEW";
pub const NEW_HERE_TAG: &str = "new-here";

const INVALID_SUBMISSION: &str = "Please give your name, email and consent to be contacted.";

/// Form fields as submitted. Everything is optional until validated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeadSubmission {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub consent: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub id: LeadId,
    pub full_name: String,
    /// Lowercased.
    pub email: String,
    pub phone: Option<String>,
    pub consent: bool,
    pub status: String,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
}

impl Lead {
    /// Validates a submission into a NEW lead tagged `new-here`.
    pub fn from_submission(submission: &LeadSubmission) -> Result<Self, PeopleError> {
        let full_name = trimmed(&submission.full_name);
        let email = trimmed(&submission.email).map(|e| e.to_lowercase());

        let (Some(full_name), Some(email)) = (full_name, email) else {
            return Err(PeopleError::validation("lead", INVALID_SUBMISSION));
        };
        if !submission.consent {
            return Err(PeopleError::validation("consent", INVALID_SUBMISSION));
        }
        if !email.contains('@') {
            return Err(PeopleError::validation("email", INVALID_SUBMISSION));
        }

        Ok(Self {
            id: LeadId::new(),
            full_name: full_name.to_string(),
            email,
            phone: trimmed(&submission.phone).map(str::to_string),
            consent: true,
            status: LEAD_STATUS_NEW.to_string(),
            tags: vec![NEW_HERE_TAG.to_string()],
            created_at: Timestamp::now(),
        })
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, consent: bool) -> LeadSubmission {
        LeadSubmission {
            full_name: Some(name.to_string()),
            email: Some(email.to_string()),
            phone: Some("  ".to_string()),
            consent,
        }
    }

    #[test]
    fn valid_submission_becomes_new_lead() {
        let lead = Lead::from_submission(&submission(" Grace Hopper ", " Grace@Example.ORG ", true))
            .unwrap();

        assert_eq!(lead.full_name, "Grace Hopper");
        assert_eq!(lead.email, "grace@example.org");
        assert_eq!(lead.phone, None);
        assert_eq!(lead.status, "NEW");
        assert_eq!(lead.tags, vec!["new-here"]);
    }

    #[test]
    fn consent_is_required() {
        let err = Lead::from_submission(&submission("Grace", "grace@example.org", false)).unwrap_err();
        assert!(matches!(err, PeopleError::ValidationFailed { ref field, .. } if field == "consent"));
    }

    #[test]
    fn blank_name_or_email_is_rejected() {
        assert!(Lead::from_submission(&submission("  ", "grace@example.org", true)).is_err());
        assert!(Lead::from_submission(&submission("Grace", "", true)).is_err());
        assert!(Lead::from_submission(&submission("Grace", "not-an-address", true)).is_err());
    }
}
