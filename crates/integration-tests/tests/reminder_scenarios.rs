//! Reminder scheduling scenarios, end to end over the SQLite adapters

use metacog_core::domain::{compute_fire_times, FireTime, NotificationSettings, QuietHours};
use metacog_core::port::NotificationHost;
use metacog_infra_sqlite::{HostPlatform, PermissionPolicy};
use metacog_integration_tests::Harness;

async fn registered(h: &Harness) -> Vec<FireTime> {
    h.host
        .list_scheduled()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.fire_time)
        .collect()
}

/// Hourly reminders with the default overnight quiet window: 08:00..=22:00
#[tokio::test]
async fn test_hourly_with_overnight_quiet_hours() {
    let h = Harness::in_memory(HostPlatform::Desktop, PermissionPolicy::Grant).await;
    let settings = NotificationSettings::new(true, 60, QuietHours::new(23, 8));

    let report = h.controller.on_settings_changed(settings).await.unwrap();

    assert!(report.is_complete());
    let times = registered(&h).await;
    assert_eq!(times.len(), 15);
    let hours: Vec<u8> = times.iter().map(|t| t.hour).collect();
    assert_eq!(hours, (8..=22).collect::<Vec<u8>>());
    assert!(times.iter().all(|t| t.minute == 0));
}

/// Disabled settings leave zero triggers whatever the interval and window
#[tokio::test]
async fn test_disabled_leaves_no_triggers() {
    let h = Harness::in_memory(HostPlatform::Desktop, PermissionPolicy::Grant).await;
    h.controller
        .on_settings_changed(NotificationSettings::default())
        .await
        .unwrap();
    assert_eq!(registered(&h).await.len(), 30);

    for (interval, quiet) in [(1, QuietHours::new(0, 0)), (30, QuietHours::new(23, 8))] {
        h.controller
            .on_settings_changed(NotificationSettings::new(false, interval, quiet))
            .await
            .unwrap();
        assert!(registered(&h).await.is_empty());
    }
}

/// Reconciling twice yields the same trigger set as reconciling once
#[tokio::test]
async fn test_reconcile_twice_same_set() {
    let h = Harness::in_memory(HostPlatform::Desktop, PermissionPolicy::Grant).await;
    let settings = NotificationSettings::new(true, 30, QuietHours::new(21, 7));

    h.scheduler.reconcile(&settings).await.unwrap();
    let once = registered(&h).await;
    h.scheduler.reconcile(&settings).await.unwrap();
    let twice = registered(&h).await;

    assert_eq!(once, twice);
    assert_eq!(once, compute_fire_times(30, QuietHours::new(21, 7)));
}

/// Equal quiet bounds silence the whole day and clear any previous schedule
#[tokio::test]
async fn test_equal_quiet_bounds_register_nothing() {
    let h = Harness::in_memory(HostPlatform::Desktop, PermissionPolicy::Grant).await;

    for (interval, bound) in [(30, 9), (1, 0)] {
        h.controller
            .on_settings_changed(NotificationSettings::default())
            .await
            .unwrap();
        assert_eq!(registered(&h).await.len(), 30);

        let settings = NotificationSettings::new(true, interval, QuietHours::new(bound, bound));
        let report = h.controller.on_settings_changed(settings).await.unwrap();

        assert!(report.enabled);
        assert_eq!(report.requested, 0);
        assert!(report.is_complete());
        assert!(registered(&h).await.is_empty());
    }
}

/// Changing the settings replaces the previous schedule entirely
#[tokio::test]
async fn test_settings_change_replaces_schedule() {
    let h = Harness::in_memory(HostPlatform::Desktop, PermissionPolicy::Grant).await;
    h.controller
        .on_settings_changed(NotificationSettings::new(true, 30, QuietHours::new(23, 8)))
        .await
        .unwrap();
    h.controller
        .on_settings_changed(NotificationSettings::new(true, 60, QuietHours::new(12, 14)))
        .await
        .unwrap();

    let times = registered(&h).await;
    assert_eq!(times, compute_fire_times(60, QuietHours::new(12, 14)));
    assert!(!times.iter().any(|t| t.hour == 12 || t.hour == 13));
    assert!(!times.iter().any(|t| t.minute == 30));
}

/// Android hosts get the default channel during initialization
#[tokio::test]
async fn test_android_initialization_registers_channel() {
    use metacog_core::application::InitOutcome;

    let h = Harness::in_memory(HostPlatform::Android, PermissionPolicy::Grant).await;
    let outcome = h.scheduler.initialize_once().await.unwrap();

    assert_eq!(outcome, InitOutcome::Ready { channel_created: true });
    assert_eq!(h.host.channels().await.unwrap().len(), 1);
}

/// Denied permission is non-fatal and skips channel setup
#[tokio::test]
async fn test_permission_denied_is_non_fatal() {
    use metacog_core::application::InitOutcome;

    let h = Harness::in_memory(HostPlatform::Android, PermissionPolicy::Deny).await;
    let outcome = h.scheduler.initialize_once().await.unwrap();

    assert_eq!(outcome, InitOutcome::PermissionDenied);
    assert!(h.host.channels().await.unwrap().is_empty());

    // settings can still be saved and applied
    let report = h
        .controller
        .on_settings_changed(NotificationSettings::default())
        .await
        .unwrap();
    assert!(report.is_complete());
}

/// Next reminder is read back from the trigger journal
#[tokio::test]
async fn test_next_reminder_after_quiet_window() {
    use metacog_core::port::time_provider::mocks::FixedTimeProvider;

    let h = Harness::in_memory(HostPlatform::Desktop, PermissionPolicy::Grant).await;
    h.controller
        .on_settings_changed(NotificationSettings::new(true, 45, QuietHours::new(22, 7)))
        .await
        .unwrap();

    for (hour, minute, expected) in [(7, 0, (7, 45)), (21, 50, (7, 0)), (3, 0, (7, 0))] {
        let clock = FixedTimeProvider::at(hour, minute);
        let next = h.scheduler.next_reminder(&clock).await.unwrap();
        assert_eq!(next, FireTime::new(expected.0, expected.1).ok());
    }
}
