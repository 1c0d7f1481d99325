//! AssignCheckInTokenHandler - issues a door token and mails it to the attendee.

use std::sync::Arc;

use crate::domain::events::{CheckInToken, EventError, Registration};
use crate::domain::foundation::{RegistrationId, UserId};
use crate::ports::{
    EventReader, ProfileRepository, RegistrationConfirmation, RegistrationNotifier,
    RegistrationRepository,
};

#[derive(Debug, Clone)]
pub struct AssignCheckInTokenCommand {
    pub registration_id: RegistrationId,
    pub assigned_by: UserId,
}

pub struct AssignCheckInTokenHandler {
    registrations: Arc<dyn RegistrationRepository>,
    events: Arc<dyn EventReader>,
    profiles: Arc<dyn ProfileRepository>,
    notifier: Arc<dyn RegistrationNotifier>,
}

impl AssignCheckInTokenHandler {
    pub fn new(
        registrations: Arc<dyn RegistrationRepository>,
        events: Arc<dyn EventReader>,
        profiles: Arc<dyn ProfileRepository>,
        notifier: Arc<dyn RegistrationNotifier>,
    ) -> Self {
        Self {
            registrations,
            events,
            profiles,
            notifier,
        }
    }

    /// Replaces any previous token. The confirmation email is best effort.
    pub async fn handle(&self, cmd: AssignCheckInTokenCommand) -> Result<Registration, EventError> {
        let token = CheckInToken::generate();
        let registration = self
            .registrations
            .assign_token(&cmd.registration_id, &token)
            .await?
            .ok_or(EventError::RegistrationNotFound(cmd.registration_id))?;

        tracing::info!(
            registration_id = %registration.id,
            event_id = %registration.event_id,
            assigned_by = %cmd.assigned_by,
            "Assigned check-in token"
        );

        self.send_confirmation(&registration, &token).await;
        Ok(registration)
    }

    async fn send_confirmation(&self, registration: &Registration, token: &CheckInToken) {
        let lookups = futures::try_join!(
            self.profiles.find(&registration.user_id),
            self.events.find(&registration.event_id),
        );

        let (profile, event) = match lookups {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(registration_id = %registration.id, error = %e, "Confirmation lookup failed");
                return;
            }
        };

        let Some(to) = profile.and_then(|p| p.email) else {
            tracing::info!(registration_id = %registration.id, "No email on profile, confirmation skipped");
            return;
        };
        let Some(event) = event else {
            tracing::warn!(event_id = %registration.event_id, "Event vanished, confirmation skipped");
            return;
        };

        let confirmation = RegistrationConfirmation {
            to,
            event_title: event.title,
            event_starts_at: event.starts_at.to_rfc3339(),
            check_in_token: token.as_str().to_string(),
        };

        if let Err(e) = self.notifier.send_registration_confirmation(&confirmation).await {
            tracing::warn!(registration_id = %registration.id, error = %e, "Confirmation email failed");
        }
    }
}
