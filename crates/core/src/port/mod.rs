// Port Layer - Interfaces for external dependencies

pub mod id_provider; // For deterministic testing
pub mod key_value_store;
pub mod notification_host;
pub mod time_provider;

// Re-exports
pub use id_provider::IdProvider;
pub use key_value_store::KeyValueStore;
pub use notification_host::{
    HostError, NotificationHost, PermissionStatus, ScheduledTrigger, TriggerId,
};
pub use time_provider::TimeProvider;
