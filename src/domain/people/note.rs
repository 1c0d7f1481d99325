//! Pastoral notes attached to a person.

use crate::domain::foundation::{NoteId, Timestamp, UserId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonNote {
    pub id: NoteId,
    pub profile_user_id: UserId,
    pub note: String,
    pub created_by: UserId,
    pub created_at: Timestamp,
}

impl PersonNote {
    /// Creates a note, rejecting blank text.
    pub fn new(
        profile_user_id: UserId,
        note: &str,
        created_by: UserId,
    ) -> Result<Self, ValidationError> {
        let note = note.trim();
        if note.is_empty() {
            return Err(ValidationError::empty_field("note"));
        }
        Ok(Self {
            id: NoteId::new(),
            profile_user_id,
            note: note.to_string(),
            created_by,
            created_at: Timestamp::now(),
        })
    }
}
