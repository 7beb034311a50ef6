// Settings Controller - explicit save-then-reconcile command sequence

use crate::application::scheduler::{NotificationScheduler, ReconcileReport};
use crate::application::settings_store::SettingsStore;
use crate::domain::NotificationSettings;
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Entry point for whatever surface edits the settings (UI, CLI)
///
/// Every mutating call holds `sync_lock` so cancel/register passes from two
/// callers never interleave.
pub struct SettingsController {
    store: Arc<SettingsStore>,
    scheduler: Arc<NotificationScheduler>,
    sync_lock: Mutex<()>,
}

impl SettingsController {
    pub fn new(store: Arc<SettingsStore>, scheduler: Arc<NotificationScheduler>) -> Self {
        Self {
            store,
            scheduler,
            sync_lock: Mutex::new(()),
        }
    }

    /// Settings currently in effect
    pub async fn current(&self) -> Result<NotificationSettings> {
        self.store.load().await
    }

    /// Persist `settings`, then reschedule from them.
    ///
    /// A failed save returns before any trigger is touched.
    pub async fn on_settings_changed(
        &self,
        settings: NotificationSettings,
    ) -> Result<ReconcileReport> {
        let _guard = self.sync_lock.lock().await;

        self.store.save(&settings).await?;
        info!(
            enabled = settings.is_notification_enabled,
            interval_minutes = settings.interval_minutes,
            quiet_hours = %settings.quiet_hours,
            "Notification settings changed"
        );

        self.scheduler.reconcile(&settings).await
    }

    /// Reschedule from the stored settings (start-up, or after an interrupted run)
    pub async fn resync(&self) -> Result<ReconcileReport> {
        let _guard = self.sync_lock.lock().await;

        let settings = self.store.load().await?;
        self.scheduler.reconcile(&settings).await
    }

    /// Forget stored settings and reschedule from the defaults
    pub async fn reset(&self) -> Result<ReconcileReport> {
        let _guard = self.sync_lock.lock().await;

        self.store.reset().await?;
        let settings = self.store.load().await?;
        info!("Notification settings reset to defaults");
        self.scheduler.reconcile(&settings).await
    }
}
