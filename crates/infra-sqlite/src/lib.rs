// Metacog Infrastructure - SQLite Adapters
// Implements: KeyValueStore (settings record), NotificationHost (trigger journal)

mod connection;
mod error;
mod kv_store;
mod migration;
mod notification_host;

pub use connection::create_pool;
pub use kv_store::SqliteKeyValueStore;
pub use migration::run_migrations;
pub use notification_host::{HostPlatform, PermissionPolicy, SqliteNotificationHost};

// Note: sqlx::Error conversion is handled by helper functions in `error`
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
