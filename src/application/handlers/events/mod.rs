//! Event sign-up, door check-in and listings.

mod assign_check_in_token;
mod check_in_by_token;
mod list_events;
mod list_my_registrations;
mod list_recent_check_ins;
mod register_for_event;

pub use assign_check_in_token::{AssignCheckInTokenCommand, AssignCheckInTokenHandler};
pub use check_in_by_token::{CheckInByTokenCommand, CheckInByTokenHandler};
pub use list_events::{EventDetail, GetEventHandler, ListEventsHandler};
pub use list_my_registrations::ListMyRegistrationsHandler;
pub use list_recent_check_ins::{ListRecentCheckInsHandler, RecentCheckIns, RECENT_CHECK_IN_LIMIT};
pub use register_for_event::{RegisterForEventCommand, RegisterForEventHandler};
