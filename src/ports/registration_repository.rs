//! RegistrationRepository port for event sign-ups and door check-in.
//!
//! Storage enforces one registration per (event, user) and one token per
//! event; `insert` reports the former as [`RegistrationInsert::Duplicate`]
//! instead of an error.

use async_trait::async_trait;

use crate::domain::events::{CheckInRecord, CheckInToken, Event, Registration};
use crate::domain::foundation::{DomainError, EventId, RegistrationId, Timestamp, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationInsert {
    Inserted,
    /// A row for the same (event, user) already exists.
    Duplicate,
}

/// A caller's registration joined with its event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingRegistration {
    pub registration: Registration,
    pub event: Event,
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn count_for_event(&self, event_id: &EventId) -> Result<i64, DomainError>;

    async fn find_for(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<Option<Registration>, DomainError>;

    async fn find(&self, id: &RegistrationId) -> Result<Option<Registration>, DomainError>;

    async fn insert(&self, registration: &Registration) -> Result<RegistrationInsert, DomainError>;

    /// Mark the registration holding `token` for `event_id` as checked in.
    ///
    /// Returns the updated registration, or `None` if no row matched.
    async fn check_in_by_token(
        &self,
        event_id: &EventId,
        token: &CheckInToken,
        at: Timestamp,
    ) -> Result<Option<Registration>, DomainError>;

    /// Most recent check-ins for an event, newest first.
    async fn recent_check_ins(
        &self,
        event_id: &EventId,
        limit: i64,
    ) -> Result<Vec<CheckInRecord>, DomainError>;

    /// Store a new token. Returns the updated registration, or `None` if unknown.
    async fn assign_token(
        &self,
        id: &RegistrationId,
        token: &CheckInToken,
    ) -> Result<Option<Registration>, DomainError>;

    /// The user's registrations for events starting at or after `now`, soonest first.
    async fn list_upcoming_for_user(
        &self,
        user_id: &UserId,
        now: Timestamp,
    ) -> Result<Vec<UpcomingRegistration>, DomainError>;
}
