//! People: profiles, CRM search, pastoral notes, visitor leads.

mod errors;
mod lead;
mod note;
mod profile;
mod search;

pub use errors::PeopleError;
pub use lead::{Lead, LeadSubmission, LEAD_STATUS_NEW, NEW_HERE_TAG};
pub use note::PersonNote;
pub use profile::{clean_tags, parse_tags, AddressInput, AddressSnapshot, PersonStatus, Profile};
pub use search::{distinct_tags, sanitize_search_term, PeopleFilter};
