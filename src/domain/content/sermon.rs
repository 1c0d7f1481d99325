//! Published sermons and video embed links.

use reqwest::Url;
use serde::Serialize;

use crate::domain::foundation::{SermonId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sermon {
    pub id: SermonId,
    pub title: String,
    pub speaker: Option<String>,
    pub series: Option<String>,
    pub youtube_url: Option<String>,
    pub preached_at: Option<Timestamp>,
    pub notes_md: Option<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
}

impl Sermon {
    pub fn embed_url(&self) -> Option<String> {
        self.youtube_url.as_deref().and_then(youtube_embed_url)
    }
}

/// Converts a watch or short-link YouTube URL into its embeddable form.
///
/// Returns `None` for anything that is not a recognisable YouTube link.
pub fn youtube_embed_url(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw.trim()).ok()?;
    let host = parsed.host_str()?;

    let video_id = if host.contains("youtu.be") {
        parsed
            .path()
            .strip_prefix('/')
            .unwrap_or(parsed.path())
            .trim()
            .to_string()
    } else if host.contains("youtube.com") {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.trim().to_string())?
    } else {
        return None;
    };

    if video_id.is_empty() {
        return None;
    }
    Some(format!("https://www.youtube.com/embed/{}", video_id))
}
