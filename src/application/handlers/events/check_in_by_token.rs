//! CheckInByTokenHandler - door check-in by scanned or typed token.

use std::sync::Arc;

use crate::domain::events::{CheckInOutcome, CheckInToken, EventError};
use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::ports::RegistrationRepository;

#[derive(Debug, Clone)]
pub struct CheckInByTokenCommand {
    pub event_id: EventId,
    /// Raw token as entered; trimmed before matching.
    pub token: String,
    pub checked_in_by: UserId,
}

pub struct CheckInByTokenHandler {
    registrations: Arc<dyn RegistrationRepository>,
}

impl CheckInByTokenHandler {
    pub fn new(registrations: Arc<dyn RegistrationRepository>) -> Self {
        Self { registrations }
    }

    pub async fn handle(&self, cmd: CheckInByTokenCommand) -> Result<CheckInOutcome, EventError> {
        let Some(token) = CheckInToken::parse(&cmd.token) else {
            return Ok(CheckInOutcome::Missing);
        };

        let updated = self
            .registrations
            .check_in_by_token(&cmd.event_id, &token, Timestamp::now())
            .await?;

        Ok(match updated {
            Some(registration) => {
                tracing::info!(
                    event_id = %cmd.event_id,
                    registration_id = %registration.id,
                    checked_in_by = %cmd.checked_in_by,
                    "Checked in"
                );
                CheckInOutcome::CheckedIn(registration)
            }
            None => {
                tracing::info!(event_id = %cmd.event_id, "Check-in token not recognised");
                CheckInOutcome::NotFound
            }
        })
    }
}
