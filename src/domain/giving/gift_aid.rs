//! Gift Aid: declarations and the finance on/off setting.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DeclarationId, Timestamp, UserId};
use crate::domain::people::AddressSnapshot;

/// Version of the declaration wording the donor accepted.
pub const DECLARATION_WORDING_VERSION: &str = "v1";

/// Settings key under which the Gift Aid toggle is stored.
pub const GIFT_AID_SETTING_KEY: &str = "gift_aid_enabled";

/// Append-only record of a donor accepting the Gift Aid declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftAidDeclaration {
    pub id: DeclarationId,
    pub user_id: UserId,
    pub accepted_at: Timestamp,
    pub address_snapshot: AddressSnapshot,
    pub wording_version: String,
}

impl GiftAidDeclaration {
    pub fn accept(user_id: UserId, address_snapshot: AddressSnapshot) -> Self {
        Self {
            id: DeclarationId::new(),
            user_id,
            accepted_at: Timestamp::now(),
            address_snapshot,
            wording_version: DECLARATION_WORDING_VERSION.to_string(),
        }
    }
}

/// Stored form of the Gift Aid toggle: `{"enabled": bool}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GiftAidSetting {
    pub enabled: bool,
}

impl GiftAidSetting {
    /// Reads the stored JSON value. Missing or malformed values mean disabled.
    pub fn from_stored(value: Option<&serde_json::Value>) -> Self {
        let enabled = value
            .and_then(|v| v.as_object())
            .and_then(|obj| obj.get("enabled"))
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        Self { enabled }
    }

    pub fn to_stored(self) -> serde_json::Value {
        serde_json::json!({ "enabled": self.enabled })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_setting_reads_as_disabled() {
        assert!(!GiftAidSetting::from_stored(None).enabled);
    }

    #[test]
    fn only_boolean_true_enables() {
        assert!(GiftAidSetting::from_stored(Some(&json!({"enabled": true}))).enabled);
        assert!(!GiftAidSetting::from_stored(Some(&json!({"enabled": "true"}))).enabled);
        assert!(!GiftAidSetting::from_stored(Some(&json!([true]))).enabled);
        assert!(!GiftAidSetting::from_stored(Some(&json!(true))).enabled);
    }

    #[test]
    fn stored_form_is_enabled_object() {
        assert_eq!(GiftAidSetting { enabled: true }.to_stored(), json!({"enabled": true}));
    }

    #[test]
    fn declaration_uses_current_wording() {
        let declaration = GiftAidDeclaration::accept(
            UserId::new("u").unwrap(),
            AddressSnapshot {
                full_name: "A".into(),
                address_line1: "B".into(),
                city: "C".into(),
                postcode: "D".into(),
            },
        );
        assert_eq!(declaration.wording_version, "v1");
    }
}
