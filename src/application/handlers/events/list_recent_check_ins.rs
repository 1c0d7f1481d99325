//! ListRecentCheckInsHandler - the door list for an event.

use std::sync::Arc;

use crate::domain::events::{CheckInRecord, Event, EventError};
use crate::domain::foundation::EventId;
use crate::ports::{EventReader, RegistrationRepository};

/// How many check-ins the door view shows.
pub const RECENT_CHECK_IN_LIMIT: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentCheckIns {
    pub event: Event,
    pub check_ins: Vec<CheckInRecord>,
}

pub struct ListRecentCheckInsHandler {
    events: Arc<dyn EventReader>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl ListRecentCheckInsHandler {
    pub fn new(events: Arc<dyn EventReader>, registrations: Arc<dyn RegistrationRepository>) -> Self {
        Self {
            events,
            registrations,
        }
    }

    pub async fn handle(&self, event_id: EventId) -> Result<RecentCheckIns, EventError> {
        let (event, check_ins) = futures::try_join!(
            self.events.find(&event_id),
            self.registrations.recent_check_ins(&event_id, RECENT_CHECK_IN_LIMIT),
        )?;

        let event = event.ok_or(EventError::NotFound(event_id))?;
        Ok(RecentCheckIns { event, check_ins })
    }
}
