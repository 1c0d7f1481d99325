//! RegisterForEventHandler - capacity-checked, idempotent event sign-up.

use std::sync::Arc;

use crate::application::handlers::identity::EnsureProfileHandler;
use crate::domain::events::{EventError, Registration, RegistrationOutcome};
use crate::domain::foundation::{AuthenticatedUser, EventId};
use crate::ports::{EventReader, ProfileRepository, RegistrationInsert, RegistrationRepository};

#[derive(Debug, Clone)]
pub struct RegisterForEventCommand {
    pub user: AuthenticatedUser,
    pub event_id: EventId,
}

/// Signs a member up for a published event.
///
/// Capacity is checked against a count read before the insert, so two
/// concurrent sign-ups for the last place can both succeed. Duplicate
/// sign-ups are caught by the (event, user) unique constraint and reported
/// as already registered.
pub struct RegisterForEventHandler {
    profiles: Arc<dyn ProfileRepository>,
    events: Arc<dyn EventReader>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl RegisterForEventHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        events: Arc<dyn EventReader>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            profiles,
            events,
            registrations,
        }
    }

    pub async fn handle(&self, cmd: RegisterForEventCommand) -> Result<RegistrationOutcome, EventError> {
        EnsureProfileHandler::new(self.profiles.clone())
            .handle(&cmd.user)
            .await?;

        let (event, count, existing) = futures::try_join!(
            self.events.find_published(&cmd.event_id),
            self.registrations.count_for_event(&cmd.event_id),
            self.registrations.find_for(&cmd.event_id, &cmd.user.id),
        )?;

        let event = event.ok_or(EventError::NotFound(cmd.event_id))?;

        if existing.is_some() {
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        if !event.has_capacity_for(count) {
            tracing::info!(event_id = %event.id, count, capacity = ?event.capacity, "Event full");
            return Err(EventError::capacity_reached(event.id));
        }

        let registration = Registration::new(event.id, cmd.user.id.clone());
        match self.registrations.insert(&registration).await {
            Ok(RegistrationInsert::Inserted) => {
                tracing::info!(
                    event_id = %event.id,
                    user_id = %cmd.user.id,
                    registration_id = %registration.id,
                    "Registered for event"
                );
                Ok(RegistrationOutcome::Registered(registration))
            }
            Ok(RegistrationInsert::Duplicate) => Ok(RegistrationOutcome::AlreadyRegistered),
            Err(e) => {
                tracing::error!(event_id = %event.id, error = %e, "Registration insert failed");
                Err(EventError::registration_failed(e.to_string()))
            }
        }
    }
}
