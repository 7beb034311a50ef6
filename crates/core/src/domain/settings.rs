// Notification Settings - the single persisted configuration record

use crate::domain::error::{DomainError, Result};
use crate::domain::quiet_hours::QuietHours;
use serde::{Deserialize, Serialize};

/// Smallest accepted spacing between reminders
pub const MIN_INTERVAL_MINUTES: u32 = 1;

/// Largest accepted spacing between reminders (one day)
pub const MAX_INTERVAL_MINUTES: u32 = 1440;

/// Default spacing between reminders
pub const DEFAULT_INTERVAL_MINUTES: u32 = 30;

/// Persisted reminder configuration.
///
/// Serialized with the camelCase field names of the stored JSON record:
/// `{"isNotificationEnabled":true,"intervalMinutes":30,"quietHours":{"start":23,"end":8}}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub is_notification_enabled: bool,
    pub interval_minutes: u32,
    pub quiet_hours: QuietHours,
}

impl NotificationSettings {
    pub fn new(is_notification_enabled: bool, interval_minutes: u32, quiet_hours: QuietHours) -> Self {
        Self {
            is_notification_enabled,
            interval_minutes,
            quiet_hours,
        }
    }

    /// Check the record invariants (interval range, hour bounds)
    pub fn validate(&self) -> Result<()> {
        if !(MIN_INTERVAL_MINUTES..=MAX_INTERVAL_MINUTES).contains(&self.interval_minutes) {
            return Err(DomainError::InvalidInterval(self.interval_minutes));
        }
        if self.quiet_hours.start > 23 {
            return Err(DomainError::InvalidQuietHour {
                field: "start",
                value: self.quiet_hours.start,
            });
        }
        if self.quiet_hours.end > 23 {
            return Err(DomainError::InvalidQuietHour {
                field: "end",
                value: self.quiet_hours.end,
            });
        }
        Ok(())
    }

    /// Copy with the master switch replaced
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.is_notification_enabled = enabled;
        self
    }

    /// Copy with the interval replaced
    pub fn with_interval(mut self, interval_minutes: u32) -> Self {
        self.interval_minutes = interval_minutes;
        self
    }

    /// Copy with the quiet window replaced
    pub fn with_quiet_hours(mut self, quiet_hours: QuietHours) -> Self {
        self.quiet_hours = quiet_hours;
        self
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            is_notification_enabled: true,
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            quiet_hours: QuietHours::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = NotificationSettings::default();
        assert!(settings.is_notification_enabled);
        assert_eq!(settings.interval_minutes, 30);
        assert_eq!(settings.quiet_hours, QuietHours::new(23, 8));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(NotificationSettings::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "isNotificationEnabled": true,
                "intervalMinutes": 30,
                "quietHours": { "start": 23, "end": 8 }
            })
        );
    }

    #[test]
    fn test_deserialize_stored_record() {
        let raw = r#"{"isNotificationEnabled":false,"intervalMinutes":60,"quietHours":{"start":22,"end":7}}"#;
        let settings: NotificationSettings = serde_json::from_str(raw).unwrap();
        assert_eq!(settings, NotificationSettings::new(false, 60, QuietHours::new(22, 7)));
    }

    #[test]
    fn test_validate_interval_bounds() {
        let base = NotificationSettings::default();
        assert_eq!(
            base.with_interval(0).validate(),
            Err(DomainError::InvalidInterval(0))
        );
        assert_eq!(
            base.with_interval(1441).validate(),
            Err(DomainError::InvalidInterval(1441))
        );
        assert!(base.with_interval(1).validate().is_ok());
        assert!(base.with_interval(1440).validate().is_ok());
        assert!(base.with_interval(7).validate().is_ok());
    }

    #[test]
    fn test_validate_quiet_hours() {
        let base = NotificationSettings::default();
        let err = base
            .with_quiet_hours(QuietHours::new(24, 8))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("start"));

        let err = base
            .with_quiet_hours(QuietHours::new(23, 30))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("end"));
    }
}
