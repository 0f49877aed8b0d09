//! Settings store: a single persisted preferences record.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::models::UserSettings;
use crate::storage::{keys, KeyValueStore};
use crate::time_utils::start_of_day;

pub struct SettingsStore {
    settings: UserSettings,
    storage: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
    /// Load persisted settings; anything missing or malformed yields the defaults.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let settings = match storage.get(keys::SETTINGS) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored settings are corrupt, using defaults");
                UserSettings::default()
            }),
            Ok(None) => UserSettings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read settings, using defaults");
                UserSettings::default()
            }
        };

        Self { settings, storage }
    }

    pub fn get(&self) -> &UserSettings {
        &self.settings
    }

    /// Replace the settings wholesale.
    ///
    /// A birthday after `now` is refused and nothing is persisted.
    pub fn update(
        &mut self,
        settings: UserSettings,
        now: DateTime<Utc>,
    ) -> Result<&UserSettings, SettingsError> {
        if let Some(birthday) = settings.birthday {
            if start_of_day(birthday) > now {
                return Err(SettingsError::FutureBirthday);
            }
        }

        self.settings = settings;
        match serde_json::to_string(&self.settings) {
            Ok(json) => {
                if let Err(e) = self.storage.set(keys::SETTINGS, &json) {
                    tracing::warn!(error = %e, "Failed to persist settings");
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to serialize settings"),
        }

        tracing::info!(theme = ?self.settings.theme, "Settings updated");
        Ok(&self.settings)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Birthday cannot be in the future.")]
    FutureBirthday,
}
