// Settings Store - loads and saves the single NotificationSettings record

use crate::application::constants::SETTINGS_KEY;
use crate::domain::NotificationSettings;
use crate::error::{AppError, Result};
use crate::port::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// JSON persistence of [`NotificationSettings`] over a key-value store
pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted settings.
    ///
    /// Returns defaults when nothing is stored, when the stored value is not
    /// valid JSON of the expected shape, or when it violates the record
    /// invariants. Only a failing read is reported as an error.
    pub async fn load(&self) -> Result<NotificationSettings> {
        let Some(raw) = self.store.get(SETTINGS_KEY).await? else {
            debug!("No stored notification settings, using defaults");
            return Ok(NotificationSettings::default());
        };

        match serde_json::from_str::<NotificationSettings>(&raw) {
            Ok(settings) => match settings.validate() {
                Ok(()) => Ok(settings),
                Err(e) => {
                    warn!(error = %e, "Stored notification settings out of range, using defaults");
                    Ok(NotificationSettings::default())
                }
            },
            Err(e) => {
                warn!(error = %e, "Malformed notification settings, using defaults");
                Ok(NotificationSettings::default())
            }
        }
    }

    /// Overwrite the stored record
    ///
    /// # Errors
    /// - AppError::Validation if the settings break an invariant
    /// - AppError::Storage if the write fails
    pub async fn save(&self, settings: &NotificationSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let raw = serde_json::to_string(settings)?;
        self.store.set(SETTINGS_KEY, &raw).await?;

        debug!(
            enabled = settings.is_notification_enabled,
            interval_minutes = settings.interval_minutes,
            quiet_start = settings.quiet_hours.start,
            quiet_end = settings.quiet_hours.end,
            "Notification settings saved"
        );
        Ok(())
    }

    /// Drop the stored record; the next load yields defaults
    pub async fn reset(&self) -> Result<()> {
        self.store.remove(SETTINGS_KEY).await?;
        debug!("Notification settings reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuietHours;
    use crate::port::key_value_store::mocks::InMemoryKeyValueStore;

    fn store() -> (Arc<InMemoryKeyValueStore>, SettingsStore) {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        (kv.clone(), SettingsStore::new(kv))
    }

    #[tokio::test]
    async fn test_load_defaults_when_absent() {
        let (_, settings_store) = store();
        let settings = settings_store.load().await.unwrap();
        assert_eq!(settings, NotificationSettings::default());
    }

    #[tokio::test]
    async fn test_round_trip() {
        let (_, settings_store) = store();
        let cases = [
            NotificationSettings::new(false, 1, QuietHours::new(0, 0)),
            NotificationSettings::new(true, 60, QuietHours::new(9, 17)),
            NotificationSettings::new(true, 1440, QuietHours::new(23, 22)),
        ];

        for settings in cases {
            settings_store.save(&settings).await.unwrap();
            assert_eq!(settings_store.load().await.unwrap(), settings);
        }
    }

    #[tokio::test]
    async fn test_malformed_json_falls_back_to_defaults() {
        let (kv, settings_store) = store();
        kv.insert_raw(SETTINGS_KEY, "{not json");
        assert_eq!(
            settings_store.load().await.unwrap(),
            NotificationSettings::default()
        );
    }

    #[tokio::test]
    async fn test_wrong_shape_falls_back_to_defaults() {
        let (kv, settings_store) = store();
        kv.insert_raw(SETTINGS_KEY, r#"{"isNotificationEnabled":"yes"}"#);
        assert_eq!(
            settings_store.load().await.unwrap(),
            NotificationSettings::default()
        );
    }

    #[tokio::test]
    async fn test_out_of_range_record_falls_back_to_defaults() {
        let (kv, settings_store) = store();
        kv.insert_raw(
            SETTINGS_KEY,
            r#"{"isNotificationEnabled":true,"intervalMinutes":0,"quietHours":{"start":23,"end":8}}"#,
        );
        assert_eq!(
            settings_store.load().await.unwrap(),
            NotificationSettings::default()
        );
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_settings() {
        let (kv, settings_store) = store();
        let invalid = NotificationSettings::default().with_interval(0);

        let err = settings_store.save(&invalid).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(kv.raw(SETTINGS_KEY).is_none());
    }

    #[tokio::test]
    async fn test_save_surfaces_storage_failure() {
        let (kv, settings_store) = store();
        kv.set_fail_writes(true);

        let err = settings_store
            .save(&NotificationSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[tokio::test]
    async fn test_reset_reverts_to_defaults() {
        let (_, settings_store) = store();
        let custom = NotificationSettings::new(false, 60, QuietHours::new(1, 2));
        settings_store.save(&custom).await.unwrap();

        settings_store.reset().await.unwrap();
        assert_eq!(
            settings_store.load().await.unwrap(),
            NotificationSettings::default()
        );
    }
}
