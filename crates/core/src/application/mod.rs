// Application Layer - Use Cases

pub mod constants;
pub mod scheduler;
pub mod settings_controller;
pub mod settings_store;

// Re-exports
pub use scheduler::{InitOutcome, NotificationScheduler, ReconcileReport};
pub use settings_controller::SettingsController;
pub use settings_store::SettingsStore;
