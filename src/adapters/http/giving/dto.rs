//! Giving DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::giving::{AmountSelection, Fund};
use crate::domain::people::AddressInput;

/// Give form submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutRequest {
    pub fund_id: Option<String>,
    /// "preset" or "custom".
    pub amount_mode: Option<String>,
    pub preset_amount_pence: Option<FormValue>,
    pub custom_amount_pounds: Option<FormValue>,
    pub gift_aid: bool,
    pub declaration_accepted: bool,
    pub full_name: Option<String>,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
}

impl CheckoutRequest {
    pub fn amount_selection(&self) -> AmountSelection {
        match self.amount_mode.as_deref() {
            Some("preset") => {
                AmountSelection::Preset(self.preset_amount_pence.as_ref().and_then(FormValue::as_pence))
            }
            Some("custom") => {
                AmountSelection::Custom(self.custom_amount_pounds.as_ref().map(FormValue::to_text))
            }
            _ => AmountSelection::Unspecified,
        }
    }

    pub fn address(&self) -> AddressInput {
        AddressInput {
            full_name: self.full_name.clone(),
            address_line1: self.address_line1.clone(),
            city: self.city.clone(),
            postcode: self.postcode.clone(),
        }
    }
}

/// Form field that browsers may send as a number or as its text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
    /// Anything else; treated as an unusable amount.
    Other(serde_json::Value),
}

impl FormValue {
    /// Whole pence, if the value is an integer or integer text.
    pub fn as_pence(&self) -> Option<i64> {
        match self {
            FormValue::Integer(pence) => Some(*pence),
            FormValue::Text(text) => text.trim().parse().ok(),
            FormValue::Decimal(_) | FormValue::Other(_) => None,
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            FormValue::Integer(n) => n.to_string(),
            FormValue::Decimal(n) => n.to_string(),
            FormValue::Text(text) => text.clone(),
            FormValue::Other(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FundsResponse {
    pub funds: Vec<Fund>,
    pub gift_aid_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftAidSettingBody {
    pub enabled: bool,
}
