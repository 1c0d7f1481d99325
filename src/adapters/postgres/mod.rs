//! PostgreSQL adapters - sqlx implementations of the storage ports.
//!
//! - `PostgresProfileRepository`, `PostgresPersonNoteRepository` - people
//! - `PostgresFundReader`, `PostgresDonationRepository`,
//!   `PostgresGiftAidDeclarationRepository`, `PostgresSettingsRepository` - giving
//! - `PostgresEventReader`, `PostgresRegistrationRepository` - events
//! - `PostgresSermonReader` - content
//! - `PostgresLeadRepository`, `PostgresDashboardReader` - visitor leads and admin counts

mod dashboard_reader;
mod donation_repository;
mod event_reader;
mod fund_reader;
mod gift_aid_declaration_repository;
mod lead_repository;
mod person_note_repository;
mod profile_repository;
mod registration_repository;
mod sermon_reader;
mod settings_repository;

pub use dashboard_reader::PostgresDashboardReader;
pub use donation_repository::PostgresDonationRepository;
pub use event_reader::PostgresEventReader;
pub use fund_reader::PostgresFundReader;
pub use gift_aid_declaration_repository::PostgresGiftAidDeclarationRepository;
pub use lead_repository::PostgresLeadRepository;
pub use person_note_repository::PostgresPersonNoteRepository;
pub use profile_repository::PostgresProfileRepository;
pub use registration_repository::PostgresRegistrationRepository;
pub use sermon_reader::PostgresSermonReader;
pub use settings_repository::PostgresSettingsRepository;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

fn parse_user_id(raw: String) -> Result<UserId, DomainError> {
    UserId::new(raw).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
    })
}
