// Scheduling engine constants (no magic values)

/// Key under which the settings record is stored
pub const SETTINGS_KEY: &str = "notificationSettings";
