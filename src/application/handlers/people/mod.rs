//! Admin people CRM and public visitor leads.

mod add_person_note;
mod get_person;
mod search_people;
mod submit_lead;
mod update_person;

pub use add_person_note::{AddPersonNoteCommand, AddPersonNoteHandler};
pub use get_person::{GetPersonHandler, PersonDetail};
pub use search_people::{PeopleSearchResult, SearchPeopleHandler};
pub use submit_lead::SubmitLeadHandler;
pub use update_person::{TagsInput, UpdatePersonCommand, UpdatePersonHandler};
