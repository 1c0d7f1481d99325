//! Public content.

mod sermons;

pub use sermons::{GetSermonHandler, ListSermonsHandler};
