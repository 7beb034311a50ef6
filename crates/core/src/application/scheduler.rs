//! Notification Scheduler - keeps the host's trigger set equal to the computed schedule
//!
//! - initialize_once: permission check/request and channel setup, once per session
//! - reconcile: cancel every trigger, then register one per computed fire time
//!
//! Reconciliation never diffs. Each call costs one cancel plus one registration
//! per daily slot, which is acceptable because settings change rarely.

use crate::domain::{
    compute_fire_times, next_fire_time, ChannelSpec, FireTime, NotificationPayload,
    NotificationSettings,
};
use crate::error::Result;
use crate::port::{HostError, NotificationHost, PermissionStatus, TimeProvider, TriggerId};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Result of the one-time host initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Permission granted; `channel_created` is false on hosts without channels
    Ready { channel_created: bool },
    /// Permission refused; reminders stay silent until it is granted
    PermissionDenied,
}

/// What a reconcile pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub enabled: bool,
    /// Fire times computed for the settings
    pub requested: usize,
    /// Triggers the host accepted, in registration order
    pub registered: Vec<TriggerId>,
    /// Per-trigger registration failures (already-registered triggers are kept)
    pub failures: Vec<HostError>,
}

impl ReconcileReport {
    /// Every computed fire time ended up registered
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.registered.len() == self.requested
    }
}

/// Reconciles host triggers with [`NotificationSettings`]
pub struct NotificationScheduler {
    host: Arc<dyn NotificationHost>,
    payload: NotificationPayload,
    init: OnceCell<InitOutcome>,
}

impl NotificationScheduler {
    pub fn new(host: Arc<dyn NotificationHost>) -> Self {
        Self::with_payload(host, NotificationPayload::metacognition_reminder())
    }

    pub fn with_payload(host: Arc<dyn NotificationHost>, payload: NotificationPayload) -> Self {
        Self {
            host,
            payload,
            init: OnceCell::new(),
        }
    }

    /// Check/request permission and register the default channel.
    ///
    /// The first successful outcome is memoized; later calls return it without
    /// touching the host. A host error leaves nothing cached so the caller may retry.
    pub async fn initialize_once(&self) -> Result<InitOutcome> {
        let outcome = self
            .init
            .get_or_try_init(|| self.initialize())
            .await?;
        Ok(*outcome)
    }

    async fn initialize(&self) -> Result<InitOutcome> {
        let mut status = self.host.permission_status().await?;
        if !status.is_granted() {
            debug!(status = %status, "Requesting notification permission");
            status = self.host.request_permission().await?;
        }

        if status != PermissionStatus::Granted {
            warn!(status = %status, "Notification permission not granted, reminders disabled");
            return Ok(InitOutcome::PermissionDenied);
        }

        let channel_created = if self.host.requires_channels() {
            let channel = ChannelSpec::default_channel();
            self.host.create_channel(&channel).await?;
            debug!(channel_id = %channel.id, importance = %channel.importance, "Notification channel ready");
            true
        } else {
            false
        };

        info!(channel_created = channel_created, "Notification system initialized");
        Ok(InitOutcome::Ready { channel_created })
    }

    /// Make the host's trigger set match `settings`.
    ///
    /// Always starts by cancelling every trigger, so it is safe to call again
    /// after a partial failure or an interrupted run.
    ///
    /// # Errors
    /// - AppError::Domain if the settings break an invariant (nothing is touched)
    /// - AppError::Host if cancellation fails (no registration is attempted)
    pub async fn reconcile(&self, settings: &NotificationSettings) -> Result<ReconcileReport> {
        settings.validate()?;

        self.host.cancel_all_scheduled().await?;

        if !settings.is_notification_enabled {
            info!("Notifications disabled, all triggers cancelled");
            return Ok(ReconcileReport::default());
        }

        let fire_times = compute_fire_times(settings.interval_minutes, settings.quiet_hours);
        let mut report = ReconcileReport {
            enabled: true,
            requested: fire_times.len(),
            registered: Vec::with_capacity(fire_times.len()),
            failures: Vec::new(),
        };

        for fire_time in fire_times {
            match self.host.schedule_repeating(fire_time, &self.payload).await {
                Ok(id) => report.registered.push(id),
                Err(e) => {
                    warn!(fire_time = %fire_time, error = %e, "Trigger registration failed");
                    report.failures.push(e);
                }
            }
        }

        info!(
            interval_minutes = settings.interval_minutes,
            quiet_hours = %settings.quiet_hours,
            requested = report.requested,
            registered = report.registered.len(),
            failed = report.failures.len(),
            "Reminder schedule reconciled"
        );
        Ok(report)
    }

    /// Next time of day a registered trigger fires, per the host's trigger set
    pub async fn next_reminder(&self, clock: &dyn TimeProvider) -> Result<Option<FireTime>> {
        let mut times: Vec<FireTime> = self
            .host
            .list_scheduled()
            .await?
            .into_iter()
            .map(|t| t.fire_time)
            .collect();
        times.sort();
        times.dedup();

        Ok(next_fire_time(&times, clock.local_time_of_day()))
    }
}
