//! UpdatePersonHandler - sets CRM status and tags.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::foundation::UserId;
use crate::domain::people::{clean_tags, parse_tags, PeopleError, PersonStatus};
use crate::ports::ProfileRepository;

/// Tags as submitted: comma-separated text from a form, or a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    Text(String),
    List(Vec<String>),
}

impl TagsInput {
    pub fn into_tags(self) -> Vec<String> {
        match self {
            TagsInput::Text(raw) => parse_tags(&raw),
            TagsInput::List(items) => clean_tags(items.iter().map(String::as_str)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdatePersonCommand {
    pub user_id: UserId,
    /// Raw status; only "MEMBER" makes a member.
    pub status: Option<String>,
    pub tags: Option<TagsInput>,
    pub updated_by: UserId,
}

pub struct UpdatePersonHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl UpdatePersonHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, cmd: UpdatePersonCommand) -> Result<(), PeopleError> {
        let status = PersonStatus::from_update(cmd.status.as_deref().unwrap_or_default());
        let tags = cmd.tags.map(TagsInput::into_tags).unwrap_or_default();

        let updated = self
            .profiles
            .update_status_tags(&cmd.user_id, status, &tags)
            .await?;
        if !updated {
            return Err(PeopleError::not_found(cmd.user_id));
        }

        tracing::info!(
            user_id = %cmd.user_id,
            updated_by = %cmd.updated_by,
            status = %status,
            tag_count = tags.len(),
            "Updated person"
        );
        Ok(())
    }
}
