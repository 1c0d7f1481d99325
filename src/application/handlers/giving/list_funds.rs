//! ListFundsHandler - active funds for the give form.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::giving::Fund;
use crate::ports::FundReader;

pub struct ListFundsHandler {
    funds: Arc<dyn FundReader>,
}

impl ListFundsHandler {
    pub fn new(funds: Arc<dyn FundReader>) -> Self {
        Self { funds }
    }

    pub async fn handle(&self) -> Result<Vec<Fund>, DomainError> {
        self.funds.list_active().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::foundation::FundId;

    fn fund(name: &str, is_active: bool) -> Fund {
        Fund {
            id: FundId::new(),
            name: name.to_string(),
            description: None,
            is_active,
        }
    }

    #[tokio::test]
    async fn lists_only_active_funds_by_name() {
        let store = Arc::new(InMemoryStore::new());
        store.add_fund(fund("Mission", true));
        store.add_fund(fund("Closed Appeal", false));
        store.add_fund(fund("General Fund", true));

        let funds = ListFundsHandler::new(store).handle().await.unwrap();

        let names: Vec<_> = funds.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["General Fund", "Mission"]);
    }
}
