//! Shared wiring for the integration tests

use metacog_core::application::{NotificationScheduler, SettingsController, SettingsStore};
use metacog_core::port::id_provider::UuidProvider;
use metacog_core::port::time_provider::SystemTimeProvider;
use metacog_infra_sqlite::{
    create_pool, run_migrations, HostPlatform, PermissionPolicy, SqliteKeyValueStore,
    SqliteNotificationHost,
};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Engine wired to SQLite adapters, as the CLI does
pub struct Harness {
    pub pool: SqlitePool,
    pub kv_store: Arc<SqliteKeyValueStore>,
    pub host: Arc<SqliteNotificationHost>,
    pub scheduler: Arc<NotificationScheduler>,
    pub controller: SettingsController,
}

impl Harness {
    pub async fn in_memory(platform: HostPlatform, permission: PermissionPolicy) -> Self {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        Self::with_pool(pool, platform, permission)
    }

    pub fn with_pool(pool: SqlitePool, platform: HostPlatform, permission: PermissionPolicy) -> Self {
        let time_provider = Arc::new(SystemTimeProvider);
        let kv_store = Arc::new(SqliteKeyValueStore::new(pool.clone(), time_provider.clone()));
        let host = Arc::new(SqliteNotificationHost::new(
            pool.clone(),
            platform,
            permission,
            Arc::new(UuidProvider),
            time_provider,
        ));
        let scheduler = Arc::new(NotificationScheduler::new(host.clone()));
        let controller = SettingsController::new(
            Arc::new(SettingsStore::new(kv_store.clone())),
            scheduler.clone(),
        );

        Self {
            pool,
            kv_store,
            host,
            scheduler,
            controller,
        }
    }
}
