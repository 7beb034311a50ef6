//! Self-healing after interrupted or concurrent reconciliation

use metacog_core::domain::{
    compute_fire_times, FireTime, NotificationPayload, NotificationSettings, QuietHours,
};
use metacog_core::port::NotificationHost;
use metacog_infra_sqlite::{HostPlatform, PermissionPolicy};
use metacog_integration_tests::Harness;
use std::sync::Arc;

async fn registered(h: &Harness) -> Vec<FireTime> {
    h.host
        .list_scheduled()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.fire_time)
        .collect()
}

/// A process killed mid-reconcile leaves a partial, stale set; the next resync fixes it
#[tokio::test]
async fn test_resync_heals_partial_schedule() {
    let h = Harness::in_memory(HostPlatform::Desktop, PermissionPolicy::Grant).await;
    let settings = NotificationSettings::new(true, 30, QuietHours::new(23, 8));
    h.controller.on_settings_changed(settings).await.unwrap();

    // leftovers from an interrupted run: a quiet-hour slot and a duplicate
    let payload = NotificationPayload::metacognition_reminder();
    h.host
        .schedule_repeating(FireTime::new(3, 0).unwrap(), &payload)
        .await
        .unwrap();
    h.host
        .schedule_repeating(FireTime::new(8, 0).unwrap(), &payload)
        .await
        .unwrap();
    assert_eq!(registered(&h).await.len(), 32);

    h.controller.resync().await.unwrap();

    assert_eq!(registered(&h).await, compute_fire_times(30, QuietHours::new(23, 8)));
}

/// Stale triggers are removed even when the stored settings are disabled
#[tokio::test]
async fn test_resync_disabled_clears_stale_triggers() {
    let h = Harness::in_memory(HostPlatform::Desktop, PermissionPolicy::Grant).await;
    h.controller
        .on_settings_changed(NotificationSettings::default().with_enabled(false))
        .await
        .unwrap();
    h.host
        .schedule_repeating(
            FireTime::new(10, 0).unwrap(),
            &NotificationPayload::metacognition_reminder(),
        )
        .await
        .unwrap();

    h.controller.resync().await.unwrap();

    assert!(registered(&h).await.is_empty());
}

/// Concurrent changes never interleave their cancel/register passes
#[tokio::test]
async fn test_concurrent_changes_produce_exact_set() {
    let h = Arc::new(Harness::in_memory(HostPlatform::Desktop, PermissionPolicy::Grant).await);
    let variants = [
        NotificationSettings::new(true, 60, QuietHours::new(23, 8)),
        NotificationSettings::new(true, 30, QuietHours::new(22, 6)),
        NotificationSettings::new(true, 15, QuietHours::new(0, 18)),
        NotificationSettings::new(false, 60, QuietHours::new(23, 8)),
    ];

    let mut handles = Vec::new();
    for settings in variants {
        let h = h.clone();
        handles.push(tokio::spawn(async move {
            h.controller.on_settings_changed(settings).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let stored = h.controller.current().await.unwrap();
    let expected = if stored.is_notification_enabled {
        compute_fire_times(stored.interval_minutes, stored.quiet_hours)
    } else {
        Vec::new()
    };
    assert_eq!(registered(&h).await, expected);
}

/// Reset falls back to the default schedule
#[tokio::test]
async fn test_reset_after_custom_settings() {
    let h = Harness::in_memory(HostPlatform::Desktop, PermissionPolicy::Grant).await;
    h.controller
        .on_settings_changed(NotificationSettings::new(true, 1, QuietHours::new(1, 0)))
        .await
        .unwrap();
    assert_eq!(registered(&h).await.len(), 60);

    h.controller.reset().await.unwrap();

    assert_eq!(
        h.controller.current().await.unwrap(),
        NotificationSettings::default()
    );
    assert_eq!(registered(&h).await.len(), 30);
}
