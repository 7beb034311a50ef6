// Domain Layer - Pure scheduling rules and entities

pub mod error;
pub mod fire_time;
pub mod payload;
pub mod quiet_hours;
pub mod settings;

// Re-exports
pub use error::DomainError;
pub use fire_time::{compute_fire_times, daily_slot_count, next_fire_time, FireTime};
pub use payload::{ChannelSpec, Importance, NotificationPayload, DEFAULT_CHANNEL_ID};
pub use quiet_hours::{is_quiet, QuietHours};
pub use settings::{NotificationSettings, MAX_INTERVAL_MINUTES, MIN_INTERVAL_MINUTES};
