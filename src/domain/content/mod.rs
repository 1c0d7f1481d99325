//! Public content: sermons.

mod sermon;

pub use sermon::{youtube_embed_url, Sermon};
