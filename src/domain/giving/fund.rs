//! Donation funds.

use serde::Serialize;

use crate::domain::foundation::FundId;

/// Name used on receipts when the fund cannot be resolved.
pub const DEFAULT_FUND_NAME: &str = "General Fund";

/// A named donation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fund {
    pub id: FundId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

impl Fund {
    /// Product name shown on the hosted checkout page.
    pub fn checkout_product_name(&self) -> String {
        format!("Donation: {}", self.name)
    }
}
