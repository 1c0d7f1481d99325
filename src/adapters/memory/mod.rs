//! In-memory adapters for tests and database-free local runs.

mod notifier;
mod store;

pub use notifier::RecordingNotifier;
pub use store::InMemoryStore;
