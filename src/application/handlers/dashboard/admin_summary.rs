//! GetAdminSummaryHandler - sermon, event and new-lead counts.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::{AdminSummary, DashboardReader};

pub struct GetAdminSummaryHandler {
    reader: Arc<dyn DashboardReader>,
}

impl GetAdminSummaryHandler {
    pub fn new(reader: Arc<dyn DashboardReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self) -> Result<AdminSummary, DomainError> {
        self.reader.admin_summary().await
    }
}
