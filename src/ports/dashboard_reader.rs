//! Read-only counts for the admin landing page.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::DomainError;

/// Totals shown on the admin dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AdminSummary {
    /// Every sermon, published or not.
    pub sermons: i64,
    /// Every event, published or not.
    pub events: i64,
    /// Leads still in NEW status.
    pub new_leads: i64,
}

#[async_trait]
pub trait DashboardReader: Send + Sync {
    async fn admin_summary(&self) -> Result<AdminSummary, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn DashboardReader) {}
    }
}
