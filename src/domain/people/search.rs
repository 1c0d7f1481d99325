//! People search filters for the admin CRM.

use std::collections::BTreeSet;

use super::PersonStatus;

/// Filter applied to the people list. Empty fields are not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeopleFilter {
    /// Sanitized free-text term matched against name and email.
    pub query: Option<String>,
    pub status: Option<PersonStatus>,
    /// Exact tag that must be present.
    pub tag: Option<String>,
}

impl PeopleFilter {
    /// Builds a filter from raw query-string values.
    pub fn from_raw(q: Option<&str>, status: Option<&str>, tag: Option<&str>) -> Self {
        Self {
            query: q.map(sanitize_search_term).filter(|t| !t.is_empty()),
            status: status.and_then(PersonStatus::parse_filter),
            tag: tag.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string),
        }
    }
}

/// Strips LIKE wildcards and list separators from a search term.
pub fn sanitize_search_term(raw: &str) -> String {
    raw.replace('%', "").replace(',', " ").trim().to_string()
}

/// Distinct, trimmed, non-empty tags in sorted order.
pub fn distinct_tags<'a>(tag_lists: impl IntoIterator<Item = &'a [String]>) -> Vec<String> {
    tag_lists
        .into_iter()
        .flatten()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_removes_wildcards_and_commas() {
        assert_eq!(sanitize_search_term(" 100%,smith "), "100 smith");
        assert_eq!(sanitize_search_term("%%"), "");
    }

    #[test]
    fn from_raw_ignores_unknown_status_and_blank_values() {
        let filter = PeopleFilter::from_raw(Some("  "), Some("ELDER"), Some(" "));
        assert_eq!(filter, PeopleFilter::default());
    }

    #[test]
    fn from_raw_keeps_valid_values() {
        let filter = PeopleFilter::from_raw(Some("jo"), Some("MEMBER"), Some(" youth "));
        assert_eq!(filter.query.as_deref(), Some("jo"));
        assert_eq!(filter.status, Some(PersonStatus::Member));
        assert_eq!(filter.tag.as_deref(), Some("youth"));
    }

    #[test]
    fn distinct_tags_sorts_and_dedupes() {
        let a = vec!["youth".to_string(), " choir".to_string()];
        let b = vec!["choir".to_string(), "".to_string(), "alpha".to_string()];
        let tags = distinct_tags([a.as_slice(), b.as_slice()]);
        assert_eq!(tags, vec!["alpha", "choir", "youth"]);
    }
}
