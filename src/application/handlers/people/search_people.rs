//! SearchPeopleHandler - admin people list with filters and the tag picker.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::people::{distinct_tags, PeopleFilter, Profile};
use crate::ports::ProfileRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeopleSearchResult {
    pub people: Vec<Profile>,
    /// Every tag in use across all profiles, not only the matches.
    pub available_tags: Vec<String>,
}

pub struct SearchPeopleHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl SearchPeopleHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, filter: PeopleFilter) -> Result<PeopleSearchResult, DomainError> {
        let (people, tag_lists) =
            futures::try_join!(self.profiles.search(&filter), self.profiles.all_tags())?;

        Ok(PeopleSearchResult {
            people,
            available_tags: distinct_tags(tag_lists.iter().map(Vec::as_slice)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::{AuthenticatedUser, Timestamp, UserId};
    use crate::domain::people::PersonStatus;

    fn person(id: &str, name: &str, status: PersonStatus, tags: &[&str], created: i64) -> Profile {
        let mut p = Profile::first_sight(&AuthenticatedUser::new(
            UserId::new(id).unwrap(),
            Some(format!("{}@example.org", id)),
            None,
        ));
        p.full_name = Some(name.to_string());
        p.status = status;
        p.tags = tags.iter().map(|t| t.to_string()).collect();
        p.created_at = Timestamp::from_unix_seconds(created).unwrap();
        p
    }

    fn store() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        store.add_profile(person("ada", "Ada Lovelace", PersonStatus::Member, &["choir", " "], 100));
        store.add_profile(person("bob", "Bob Smith", PersonStatus::Visitor, &["youth"], 200));
        store.add_profile(person("cat", "Cat Smith", PersonStatus::Member, &["youth", "choir"], 300));
        store
    }

    fn ids(result: &PeopleSearchResult) -> Vec<&str> {
        result.people.iter().map(|p| p.user_id.as_str()).collect()
    }

    #[tokio::test]
    async fn empty_filter_lists_everyone_newest_first() {
        let result = SearchPeopleHandler::new(store())
            .handle(PeopleFilter::default())
            .await
            .unwrap();

        assert_eq!(ids(&result), vec!["cat", "bob", "ada"]);
        assert_eq!(result.available_tags, vec!["choir", "youth"]);
    }

    #[tokio::test]
    async fn filters_combine() {
        let filter = PeopleFilter::from_raw(Some("smith"), Some("MEMBER"), Some("youth"));

        let result = SearchPeopleHandler::new(store()).handle(filter).await.unwrap();

        assert_eq!(ids(&result), vec!["cat"]);
        assert_eq!(result.available_tags, vec!["choir", "youth"]);
    }

    #[tokio::test]
    async fn query_matches_email_case_insensitively() {
        let filter = PeopleFilter::from_raw(Some("BOB@"), None, None);

        let result = SearchPeopleHandler::new(store()).handle(filter).await.unwrap();

        assert_eq!(ids(&result), vec!["bob"]);
    }
}
