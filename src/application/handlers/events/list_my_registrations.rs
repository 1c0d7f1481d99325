//! ListMyRegistrationsHandler - the caller's upcoming sign-ups.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::{RegistrationRepository, UpcomingRegistration};

pub struct ListMyRegistrationsHandler {
    registrations: Arc<dyn RegistrationRepository>,
}

impl ListMyRegistrationsHandler {
    pub fn new(registrations: Arc<dyn RegistrationRepository>) -> Self {
        Self { registrations }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<UpcomingRegistration>, DomainError> {
        self.registrations
            .list_upcoming_for_user(user_id, Timestamp::now())
            .await
    }
}
