//! People CRM DTOs.

use serde::{Deserialize, Serialize};

use crate::application::handlers::people::TagsInput;
use crate::domain::people::PersonNote;

use super::super::account::ProfileResponse;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeopleQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeopleResponse {
    pub people: Vec<ProfileResponse>,
    pub available_tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteResponse {
    pub id: String,
    pub note: String,
    pub created_by: String,
    pub created_at: String,
}

impl From<PersonNote> for NoteResponse {
    fn from(n: PersonNote) -> Self {
        Self {
            id: n.id.to_string(),
            note: n.note,
            created_by: n.created_by.to_string(),
            created_at: n.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonResponse {
    pub profile: ProfileResponse,
    pub notes: Vec<NoteResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdatePersonRequest {
    pub status: Option<String>,
    pub tags: Option<TagsInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddNoteRequest {
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_accept_text_or_array() {
        let text: UpdatePersonRequest =
            serde_json::from_str(r#"{"status":"MEMBER","tags":"choir, youth"}"#).unwrap();
        let list: UpdatePersonRequest = serde_json::from_str(r#"{"tags":["choir"]}"#).unwrap();

        assert_eq!(text.tags, Some(TagsInput::Text("choir, youth".to_string())));
        assert_eq!(list.tags, Some(TagsInput::List(vec!["choir".to_string()])));
        assert!(list.status.is_none());
    }
}
