//! Shared application state for every router.

use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::memory::{InMemoryStore, RecordingNotifier};
use crate::adapters::postgres::{
    PostgresDashboardReader, PostgresDonationRepository, PostgresEventReader, PostgresFundReader,
    PostgresGiftAidDeclarationRepository, PostgresLeadRepository, PostgresPersonNoteRepository,
    PostgresProfileRepository, PostgresRegistrationRepository, PostgresSermonReader,
    PostgresSettingsRepository,
};
use crate::application::handlers::content::{GetSermonHandler, ListSermonsHandler};
use crate::application::handlers::dashboard::GetAdminSummaryHandler;
use crate::application::handlers::events::{
    AssignCheckInTokenHandler, CheckInByTokenHandler, GetEventHandler, ListEventsHandler,
    ListMyRegistrationsHandler, ListRecentCheckInsHandler, RegisterForEventHandler,
};
use crate::application::handlers::giving::{
    CheckoutSettings, GetGiftAidSettingHandler, ListFundsHandler, ReconcilePaymentWebhookHandler,
    StartCheckoutHandler, UpdateGiftAidSettingHandler,
};
use crate::application::handlers::identity::{EnsureProfileHandler, RequireRoleHandler};
use crate::application::handlers::people::{
    AddPersonNoteHandler, GetPersonHandler, SearchPeopleHandler, SubmitLeadHandler,
    UpdatePersonHandler,
};
use crate::ports::{
    DashboardReader, DonationRepository, EventReader, FundReader, GiftAidDeclarationRepository,
    LeadRepository, PaymentProvider, PersonNoteRepository, ProfileRepository, ReceiptNotifier, RegistrationNotifier,
    RegistrationRepository, SermonReader, SessionValidator, SettingsRepository,
};

/// Shared application state containing all dependencies.
///
/// Cloned per request; every field is an `Arc`, so handlers are built on
/// demand from the same adapters.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileRepository>,
    pub notes: Arc<dyn PersonNoteRepository>,
    pub funds: Arc<dyn FundReader>,
    pub donations: Arc<dyn DonationRepository>,
    pub declarations: Arc<dyn GiftAidDeclarationRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub events: Arc<dyn EventReader>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub sermons: Arc<dyn SermonReader>,
    pub leads: Arc<dyn LeadRepository>,
    pub dashboard: Arc<dyn DashboardReader>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub receipts: Arc<dyn ReceiptNotifier>,
    pub registration_notifier: Arc<dyn RegistrationNotifier>,
    pub checkout: CheckoutSettings,
}

impl AppState {
    /// Production wiring: every repository on one pool.
    pub fn postgres<N>(
        pool: PgPool,
        notifier: Arc<N>,
        payment_provider: Arc<dyn PaymentProvider>,
        session_validator: Arc<dyn SessionValidator>,
        checkout: CheckoutSettings,
    ) -> Self
    where
        N: ReceiptNotifier + RegistrationNotifier + 'static,
    {
        Self {
            profiles: Arc::new(PostgresProfileRepository::new(pool.clone())),
            notes: Arc::new(PostgresPersonNoteRepository::new(pool.clone())),
            funds: Arc::new(PostgresFundReader::new(pool.clone())),
            donations: Arc::new(PostgresDonationRepository::new(pool.clone())),
            declarations: Arc::new(PostgresGiftAidDeclarationRepository::new(pool.clone())),
            settings: Arc::new(PostgresSettingsRepository::new(pool.clone())),
            events: Arc::new(PostgresEventReader::new(pool.clone())),
            registrations: Arc::new(PostgresRegistrationRepository::new(pool.clone())),
            sermons: Arc::new(PostgresSermonReader::new(pool.clone())),
            leads: Arc::new(PostgresLeadRepository::new(pool.clone())),
            dashboard: Arc::new(PostgresDashboardReader::new(pool)),
            payment_provider,
            session_validator,
            receipts: notifier.clone(),
            registration_notifier: notifier,
            checkout,
        }
    }

    /// State backed entirely by one in-memory store and a recording notifier.
    pub fn in_memory(
        store: Arc<InMemoryStore>,
        notifier: Arc<RecordingNotifier>,
        payment_provider: Arc<dyn PaymentProvider>,
        session_validator: Arc<dyn SessionValidator>,
        checkout: CheckoutSettings,
    ) -> Self {
        Self {
            profiles: store.clone(),
            notes: store.clone(),
            funds: store.clone(),
            donations: store.clone(),
            declarations: store.clone(),
            settings: store.clone(),
            events: store.clone(),
            registrations: store.clone(),
            sermons: store.clone(),
            leads: store.clone(),
            dashboard: store,
            payment_provider,
            session_validator,
            receipts: notifier.clone(),
            registration_notifier: notifier,
            checkout,
        }
    }

    // identity

    pub fn ensure_profile_handler(&self) -> EnsureProfileHandler {
        EnsureProfileHandler::new(self.profiles.clone())
    }

    pub fn require_role_handler(&self) -> RequireRoleHandler {
        RequireRoleHandler::new(self.profiles.clone())
    }

    // giving

    pub fn start_checkout_handler(&self) -> StartCheckoutHandler {
        StartCheckoutHandler::new(
            self.profiles.clone(),
            self.funds.clone(),
            self.settings.clone(),
            self.declarations.clone(),
            self.donations.clone(),
            self.payment_provider.clone(),
            self.checkout.clone(),
        )
    }

    pub fn webhook_handler(&self) -> ReconcilePaymentWebhookHandler {
        ReconcilePaymentWebhookHandler::new(
            self.payment_provider.clone(),
            self.donations.clone(),
            self.funds.clone(),
            self.profiles.clone(),
            self.receipts.clone(),
        )
    }

    pub fn list_funds_handler(&self) -> ListFundsHandler {
        ListFundsHandler::new(self.funds.clone())
    }

    pub fn get_gift_aid_setting_handler(&self) -> GetGiftAidSettingHandler {
        GetGiftAidSettingHandler::new(self.settings.clone())
    }

    pub fn update_gift_aid_setting_handler(&self) -> UpdateGiftAidSettingHandler {
        UpdateGiftAidSettingHandler::new(self.settings.clone())
    }

    // events

    pub fn list_events_handler(&self) -> ListEventsHandler {
        ListEventsHandler::new(self.events.clone())
    }

    pub fn get_event_handler(&self) -> GetEventHandler {
        GetEventHandler::new(self.events.clone(), self.registrations.clone())
    }

    pub fn register_handler(&self) -> RegisterForEventHandler {
        RegisterForEventHandler::new(
            self.profiles.clone(),
            self.events.clone(),
            self.registrations.clone(),
        )
    }

    pub fn my_registrations_handler(&self) -> ListMyRegistrationsHandler {
        ListMyRegistrationsHandler::new(self.registrations.clone())
    }

    pub fn check_in_handler(&self) -> CheckInByTokenHandler {
        CheckInByTokenHandler::new(self.registrations.clone())
    }

    pub fn recent_check_ins_handler(&self) -> ListRecentCheckInsHandler {
        ListRecentCheckInsHandler::new(self.events.clone(), self.registrations.clone())
    }

    pub fn assign_token_handler(&self) -> AssignCheckInTokenHandler {
        AssignCheckInTokenHandler::new(
            self.registrations.clone(),
            self.events.clone(),
            self.profiles.clone(),
            self.registration_notifier.clone(),
        )
    }

    // people

    pub fn search_people_handler(&self) -> SearchPeopleHandler {
        SearchPeopleHandler::new(self.profiles.clone())
    }

    pub fn get_person_handler(&self) -> GetPersonHandler {
        GetPersonHandler::new(self.profiles.clone(), self.notes.clone())
    }

    pub fn update_person_handler(&self) -> UpdatePersonHandler {
        UpdatePersonHandler::new(self.profiles.clone())
    }

    pub fn add_note_handler(&self) -> AddPersonNoteHandler {
        AddPersonNoteHandler::new(self.profiles.clone(), self.notes.clone())
    }

    pub fn submit_lead_handler(&self) -> SubmitLeadHandler {
        SubmitLeadHandler::new(self.leads.clone())
    }

    pub fn admin_summary_handler(&self) -> GetAdminSummaryHandler {
        GetAdminSummaryHandler::new(self.dashboard.clone())
    }

    // content

    pub fn list_sermons_handler(&self) -> ListSermonsHandler {
        ListSermonsHandler::new(self.sermons.clone())
    }

    pub fn get_sermon_handler(&self) -> GetSermonHandler {
        GetSermonHandler::new(self.sermons.clone())
    }
}
