//! AddPersonNoteHandler - records a pastoral note against a person.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::people::{PeopleError, PersonNote};
use crate::ports::{PersonNoteRepository, ProfileRepository};

#[derive(Debug, Clone)]
pub struct AddPersonNoteCommand {
    pub user_id: UserId,
    pub note: String,
    pub created_by: UserId,
}

pub struct AddPersonNoteHandler {
    profiles: Arc<dyn ProfileRepository>,
    notes: Arc<dyn PersonNoteRepository>,
}

impl AddPersonNoteHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, notes: Arc<dyn PersonNoteRepository>) -> Self {
        Self { profiles, notes }
    }

    pub async fn handle(&self, cmd: AddPersonNoteCommand) -> Result<PersonNote, PeopleError> {
        let note = PersonNote::new(cmd.user_id.clone(), &cmd.note, cmd.created_by)?;

        if self.profiles.find(&cmd.user_id).await?.is_none() {
            return Err(PeopleError::not_found(cmd.user_id));
        }

        self.notes.insert(&note).await?;
        tracing::info!(user_id = %note.profile_user_id, created_by = %note.created_by, "Added person note");
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::AuthenticatedUser;
    use crate::domain::people::Profile;

    fn setup() -> (Arc<InMemoryStore>, AddPersonNoteHandler, UserId) {
        let store = Arc::new(InMemoryStore::new());
        let ada = UserId::new("ada").unwrap();
        store.add_profile(Profile::first_sight(&AuthenticatedUser::new(ada.clone(), None, None)));
        let handler = AddPersonNoteHandler::new(store.clone(), store.clone());
        (store, handler, ada)
    }

    fn command(user_id: UserId, note: &str) -> AddPersonNoteCommand {
        AddPersonNoteCommand {
            user_id,
            note: note.to_string(),
            created_by: UserId::new("pastor").unwrap(),
        }
    }

    #[tokio::test]
    async fn records_author() {
        let (store, handler, ada) = setup();

        let note = handler.handle(command(ada, "  Asked about baptism ")).await.unwrap();

        assert_eq!(note.note, "Asked about baptism");
        assert_eq!(note.created_by.as_str(), "pastor");
        assert_eq!(store.notes().len(), 1);
    }

    #[tokio::test]
    async fn blank_note_is_rejected() {
        let (store, handler, ada) = setup();

        let err = handler.handle(command(ada, "   ")).await.unwrap_err();

        assert!(matches!(err, PeopleError::ValidationFailed { ref field, .. } if field == "note"));
        assert!(store.notes().is_empty());
    }

    #[tokio::test]
    async fn unknown_person_is_not_found() {
        let (store, handler, _) = setup();

        let err = handler
            .handle(command(UserId::new("ghost").unwrap(), "hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, PeopleError::NotFound(_)));
        assert!(store.notes().is_empty());
    }
}
