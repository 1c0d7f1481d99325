//! SubmitLeadHandler - stores a "New here" visitor lead.

use std::sync::Arc;

use crate::domain::people::{Lead, LeadSubmission, PeopleError};
use crate::ports::LeadRepository;

pub struct SubmitLeadHandler {
    leads: Arc<dyn LeadRepository>,
}

impl SubmitLeadHandler {
    pub fn new(leads: Arc<dyn LeadRepository>) -> Self {
        Self { leads }
    }

    pub async fn handle(&self, submission: LeadSubmission) -> Result<Lead, PeopleError> {
        let lead = Lead::from_submission(&submission)?;

        self.leads
            .insert(&lead)
            .await
            .map_err(|e| PeopleError::SubmissionFailed(e.to_string()))?;

        tracing::info!(lead_id = %lead.id, "New visitor lead");
        Ok(lead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;

    fn submission(consent: bool) -> LeadSubmission {
        LeadSubmission {
            full_name: Some("Grace Hopper".to_string()),
            email: Some("GRACE@example.org".to_string()),
            phone: Some("01904 000000".to_string()),
            consent,
        }
    }

    #[tokio::test]
    async fn stores_lowercased_new_lead() {
        let store = Arc::new(InMemoryStore::new());
        let handler = SubmitLeadHandler::new(store.clone());

        handler.handle(submission(true)).await.unwrap();

        let leads = store.leads();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].email, "grace@example.org");
        assert_eq!(leads[0].phone.as_deref(), Some("01904 000000"));
    }

    #[tokio::test]
    async fn missing_consent_stores_nothing() {
        let store = Arc::new(InMemoryStore::new());
        let handler = SubmitLeadHandler::new(store.clone());

        let err = handler.handle(submission(false)).await.unwrap_err();

        assert!(matches!(err, PeopleError::ValidationFailed { .. }));
        assert!(store.leads().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_is_reported_as_submission_failure() {
        let store = Arc::new(InMemoryStore::new());
        store.fail_on("insert lead");
        let handler = SubmitLeadHandler::new(store.clone());

        let err = handler.handle(submission(true)).await.unwrap_err();

        assert!(matches!(err, PeopleError::SubmissionFailed(_)));
        assert_eq!(err.message(), "Unable to submit right now. Please try again.");
    }
}
