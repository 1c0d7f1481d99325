//! Public event listing.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::events::{Event, EventError, RegistrationAvailability};
use crate::domain::foundation::{DomainError, EventId, UserId};
use crate::ports::{EventReader, RegistrationRepository};

pub struct ListEventsHandler {
    events: Arc<dyn EventReader>,
}

impl ListEventsHandler {
    pub fn new(events: Arc<dyn EventReader>) -> Self {
        Self { events }
    }

    pub async fn handle(&self) -> Result<Vec<Event>, DomainError> {
        self.events.list_published().await
    }
}

/// A published event with sign-up availability for the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub registered_count: i64,
    /// Absent for anonymous viewers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<RegistrationAvailability>,
}

pub struct GetEventHandler {
    events: Arc<dyn EventReader>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl GetEventHandler {
    pub fn new(events: Arc<dyn EventReader>, registrations: Arc<dyn RegistrationRepository>) -> Self {
        Self {
            events,
            registrations,
        }
    }

    pub async fn handle(
        &self,
        id: EventId,
        viewer: Option<&UserId>,
    ) -> Result<EventDetail, EventError> {
        let existing = async {
            match viewer {
                Some(user_id) => self.registrations.find_for(&id, user_id).await,
                None => Ok(None),
            }
        };
        let (event, registered_count, existing) = futures::try_join!(
            self.events.find_published(&id),
            self.registrations.count_for_event(&id),
            existing,
        )?;

        let event = event.ok_or(EventError::NotFound(id))?;
        let availability = viewer.map(|_| {
            RegistrationAvailability::assess(&event, registered_count, existing.is_some())
        });

        Ok(EventDetail {
            event,
            registered_count,
            availability,
        })
    }
}
