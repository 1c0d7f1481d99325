//! Gift Aid toggle: read by the give form, written by finance admins.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::giving::{GiftAidSetting, GIFT_AID_SETTING_KEY};
use crate::ports::SettingsRepository;

pub struct GetGiftAidSettingHandler {
    settings: Arc<dyn SettingsRepository>,
}

impl GetGiftAidSettingHandler {
    pub fn new(settings: Arc<dyn SettingsRepository>) -> Self {
        Self { settings }
    }

    pub async fn handle(&self) -> Result<GiftAidSetting, DomainError> {
        let stored = self.settings.get(GIFT_AID_SETTING_KEY).await?;
        Ok(GiftAidSetting::from_stored(stored.as_ref()))
    }
}

#[derive(Debug, Clone)]
pub struct UpdateGiftAidSettingCommand {
    pub enabled: bool,
    pub updated_by: UserId,
}

pub struct UpdateGiftAidSettingHandler {
    settings: Arc<dyn SettingsRepository>,
}

impl UpdateGiftAidSettingHandler {
    pub fn new(settings: Arc<dyn SettingsRepository>) -> Self {
        Self { settings }
    }

    pub async fn handle(&self, cmd: UpdateGiftAidSettingCommand) -> Result<GiftAidSetting, DomainError> {
        let setting = GiftAidSetting {
            enabled: cmd.enabled,
        };
        self.settings.put(GIFT_AID_SETTING_KEY, &setting.to_stored()).await?;

        tracing::info!(
            updated_by = %cmd.updated_by,
            enabled = setting.enabled,
            "Gift Aid setting changed"
        );
        Ok(setting)
    }
}
