//! Church events that members can sign up for.

use serde::Serialize;

use crate::domain::foundation::{EventId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    /// Maximum number of registrations; `None` means unlimited.
    pub capacity: Option<i32>,
    pub is_published: bool,
}

impl Event {
    /// Whether one more registration fits given the current count.
    pub fn has_capacity_for(&self, current_count: i64) -> bool {
        match self.capacity {
            Some(capacity) => current_count < i64::from(capacity),
            None => true,
        }
    }

    pub fn is_upcoming(&self, now: &Timestamp) -> bool {
        !self.starts_at.is_before(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(capacity: Option<i32>) -> Event {
        Event {
            id: EventId::new(),
            title: "Harvest Supper".to_string(),
            description: None,
            location: None,
            starts_at: Timestamp::from_unix_seconds(2_000_000_000).unwrap(),
            ends_at: None,
            capacity,
            is_published: true,
        }
    }

    #[test]
    fn unlimited_capacity_always_fits() {
        assert!(event(None).has_capacity_for(0));
        assert!(event(None).has_capacity_for(1_000_000));
    }

    #[test]
    fn full_event_has_no_room() {
        let e = event(Some(2));
        assert!(e.has_capacity_for(1));
        assert!(!e.has_capacity_for(2));
        assert!(!e.has_capacity_for(3));
    }

    #[test]
    fn zero_capacity_rejects_first_registration() {
        assert!(!event(Some(0)).has_capacity_for(0));
    }

    #[test]
    fn upcoming_includes_start_instant() {
        let e = event(None);
        assert!(e.is_upcoming(&e.starts_at));
        assert!(!e.is_upcoming(&Timestamp::from_unix_seconds(2_000_000_001).unwrap()));
    }
}
