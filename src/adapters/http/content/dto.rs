//! Content DTOs.

use serde::Serialize;

use crate::domain::content::Sermon;

#[derive(Debug, Clone, Serialize)]
pub struct SermonResponse {
    #[serde(flatten)]
    pub sermon: Sermon,
    /// Embeddable player URL, when the video link is a recognised YouTube URL.
    pub embed_url: Option<String>,
}

impl From<Sermon> for SermonResponse {
    fn from(sermon: Sermon) -> Self {
        let embed_url = sermon.embed_url();
        Self { sermon, embed_url }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SermonsResponse {
    pub sermons: Vec<Sermon>,
}
