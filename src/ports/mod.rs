//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports and are
//! injected into handlers as `Arc<dyn Port>`.
//!
//! ## Storage Ports
//!
//! - `ProfileRepository`, `PersonNoteRepository` - people and pastoral notes
//! - `FundReader`, `DonationRepository`, `GiftAidDeclarationRepository`,
//!   `SettingsRepository` - giving
//! - `EventReader`, `RegistrationRepository` - events and check-in
//! - `SermonReader` - public content
//! - `LeadRepository` - visitor leads
//! - `DashboardReader` - admin landing counts
//!
//! ## External Service Ports
//!
//! - `PaymentProvider` - hosted checkout and webhook verification
//! - `SessionValidator` - bearer token validation
//! - `ReceiptNotifier`, `RegistrationNotifier` - transactional email

mod dashboard_reader;
mod donation_repository;
mod event_reader;
mod fund_reader;
mod gift_aid_declaration_repository;
mod lead_repository;
mod notifier;
mod payment_provider;
mod person_note_repository;
mod profile_repository;
mod registration_repository;
mod sermon_reader;
mod session_validator;
mod settings_repository;

pub use dashboard_reader::{AdminSummary, DashboardReader};
pub use donation_repository::{DonationRepository, DonationUpsert, ReconcileWrite};
pub use event_reader::EventReader;
pub use fund_reader::FundReader;
pub use gift_aid_declaration_repository::GiftAidDeclarationRepository;
pub use lead_repository::LeadRepository;
pub use notifier::{DonationReceipt, ReceiptNotifier, RegistrationConfirmation, RegistrationNotifier};
pub use payment_provider::{
    CheckoutSession, CheckoutSessionData, CreateCheckoutRequest, PaymentError, PaymentErrorCode,
    PaymentProvider, WebhookEvent, WebhookEventType,
};
pub use person_note_repository::PersonNoteRepository;
pub use profile_repository::ProfileRepository;
pub use registration_repository::{RegistrationInsert, RegistrationRepository, UpcomingRegistration};
pub use sermon_reader::SermonReader;
pub use session_validator::SessionValidator;
pub use settings_repository::SettingsRepository;
