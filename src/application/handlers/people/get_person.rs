//! GetPersonHandler - one profile with its pastoral notes.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::people::{PeopleError, PersonNote, Profile};
use crate::ports::{PersonNoteRepository, ProfileRepository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDetail {
    pub profile: Profile,
    /// Newest first.
    pub notes: Vec<PersonNote>,
}

pub struct GetPersonHandler {
    profiles: Arc<dyn ProfileRepository>,
    notes: Arc<dyn PersonNoteRepository>,
}

impl GetPersonHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, notes: Arc<dyn PersonNoteRepository>) -> Self {
        Self { profiles, notes }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<PersonDetail, PeopleError> {
        let (profile, notes) =
            futures::try_join!(self.profiles.find(user_id), self.notes.list_for(user_id))?;

        let profile = profile.ok_or_else(|| PeopleError::not_found(user_id.clone()))?;
        Ok(PersonDetail { profile, notes })
    }
}
