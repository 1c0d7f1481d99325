//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! HTTP handlers build a handler per request from the shared `AppState`.

pub mod handlers;

pub use handlers::content::{GetSermonHandler, ListSermonsHandler};
pub use handlers::dashboard::GetAdminSummaryHandler;
pub use handlers::events::{
    AssignCheckInTokenCommand, AssignCheckInTokenHandler, CheckInByTokenCommand,
    CheckInByTokenHandler, EventDetail, GetEventHandler, ListEventsHandler, ListMyRegistrationsHandler,
    ListRecentCheckInsHandler, RecentCheckIns, RegisterForEventCommand, RegisterForEventHandler,
};
pub use handlers::giving::{
    CheckoutSettings, GetGiftAidSettingHandler, ListFundsHandler, ReconcileOutcome,
    ReconcilePaymentWebhookCommand, ReconcilePaymentWebhookHandler, StartCheckoutCommand,
    StartCheckoutHandler, StartCheckoutResult, UpdateGiftAidSettingCommand,
    UpdateGiftAidSettingHandler,
};
pub use handlers::identity::{EnsureProfileHandler, RequireRoleHandler, RoleGate};
pub use handlers::people::{
    AddPersonNoteCommand, AddPersonNoteHandler, GetPersonHandler, PersonDetail,
    PeopleSearchResult, SearchPeopleHandler, SubmitLeadHandler, TagsInput, UpdatePersonCommand, UpdatePersonHandler,
};
