// Notification Host Port
// Abstraction over the platform's local notification scheduler

use crate::domain::{ChannelSpec, FireTime, NotificationPayload};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Host-assigned identifier of a registered trigger
pub type TriggerId = String;

/// Permission state reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

impl std::fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionStatus::Granted => write!(f, "GRANTED"),
            PermissionStatus::Denied => write!(f, "DENIED"),
            PermissionStatus::Undetermined => write!(f, "UNDETERMINED"),
        }
    }
}

impl std::str::FromStr for PermissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GRANTED" => Ok(PermissionStatus::Granted),
            "DENIED" => Ok(PermissionStatus::Denied),
            "UNDETERMINED" => Ok(PermissionStatus::Undetermined),
            other => Err(format!("unknown permission status: {}", other)),
        }
    }
}

/// A repeating trigger as enumerated by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTrigger {
    pub id: TriggerId,
    pub fire_time: FireTime,
    pub payload: NotificationPayload,
    pub repeats: bool,
}

/// Host errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Trigger registration failed at {fire_time}: {reason}")]
    Registration { fire_time: FireTime, reason: String },

    #[error("Cancelling scheduled triggers failed: {0}")]
    Cancellation(String),

    #[error("Channel setup failed: {0}")]
    Channel(String),

    #[error("Host unavailable: {0}")]
    Unavailable(String),
}

/// Notification Host trait
///
/// Implementations:
/// - SqliteNotificationHost: journals triggers in SQLite (infra-sqlite)
/// - mocks::RecordingNotificationHost: in-memory, failure injection
#[async_trait]
pub trait NotificationHost: Send + Sync {
    /// Current permission state, without prompting
    async fn permission_status(&self) -> Result<PermissionStatus, HostError>;

    /// Prompt for permission and return the answer
    async fn request_permission(&self) -> Result<PermissionStatus, HostError>;

    /// Whether notifications must be attached to a channel on this host
    fn requires_channels(&self) -> bool;

    /// Create (or update) a notification channel
    async fn create_channel(&self, channel: &ChannelSpec) -> Result<(), HostError>;

    /// Cancel every trigger registered by this app. Succeeds when none exist.
    async fn cancel_all_scheduled(&self) -> Result<(), HostError>;

    /// Register a daily repeating trigger
    ///
    /// # Errors
    /// - HostError::Registration if the host rejects the trigger
    async fn schedule_repeating(
        &self,
        fire_time: FireTime,
        payload: &NotificationPayload,
    ) -> Result<TriggerId, HostError>;

    /// Enumerate the registered triggers
    async fn list_scheduled(&self) -> Result<Vec<ScheduledTrigger>, HostError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct HostState {
        permission: Option<PermissionStatus>,
        answer_on_request: Option<PermissionStatus>,
        channels: Vec<ChannelSpec>,
        triggers: Vec<ScheduledTrigger>,
        failing_slots: HashSet<FireTime>,
        fail_cancel: bool,
        next_id: u64,
        status_calls: usize,
        request_calls: usize,
        cancel_calls: usize,
        schedule_calls: usize,
    }

    /// In-memory host that records every call
    pub struct RecordingNotificationHost {
        state: Arc<Mutex<HostState>>,
        requires_channels: bool,
    }

    impl RecordingNotificationHost {
        /// Host that already has permission and needs no channels
        pub fn granted() -> Self {
            Self::with_permission(PermissionStatus::Granted, PermissionStatus::Granted)
        }

        /// Host that starts undetermined and answers a request with `answer`
        pub fn prompting(answer: PermissionStatus) -> Self {
            Self::with_permission(PermissionStatus::Undetermined, answer)
        }

        pub fn with_permission(current: PermissionStatus, answer: PermissionStatus) -> Self {
            let state = HostState {
                permission: Some(current),
                answer_on_request: Some(answer),
                ..Default::default()
            };
            Self {
                state: Arc::new(Mutex::new(state)),
                requires_channels: false,
            }
        }

        /// Behave like a host that groups notifications in channels
        pub fn with_channels(mut self) -> Self {
            self.requires_channels = true;
            self
        }

        /// Make registration of `fire_time` fail
        pub fn fail_at(&self, fire_time: FireTime) {
            self.state.lock().unwrap().failing_slots.insert(fire_time);
        }

        pub fn set_fail_cancel(&self, fail: bool) {
            self.state.lock().unwrap().fail_cancel = fail;
        }

        pub fn fire_times(&self) -> Vec<FireTime> {
            let state = self.state.lock().unwrap();
            state.triggers.iter().map(|t| t.fire_time).collect()
        }

        pub fn channels(&self) -> Vec<ChannelSpec> {
            self.state.lock().unwrap().channels.clone()
        }

        pub fn status_calls(&self) -> usize {
            self.state.lock().unwrap().status_calls
        }

        pub fn request_calls(&self) -> usize {
            self.state.lock().unwrap().request_calls
        }

        pub fn cancel_calls(&self) -> usize {
            self.state.lock().unwrap().cancel_calls
        }

        pub fn schedule_calls(&self) -> usize {
            self.state.lock().unwrap().schedule_calls
        }
    }

    #[async_trait]
    impl NotificationHost for RecordingNotificationHost {
        async fn permission_status(&self) -> Result<PermissionStatus, HostError> {
            let mut state = self.state.lock().unwrap();
            state.status_calls += 1;
            Ok(state.permission.unwrap_or(PermissionStatus::Undetermined))
        }

        async fn request_permission(&self) -> Result<PermissionStatus, HostError> {
            let mut state = self.state.lock().unwrap();
            state.request_calls += 1;
            let answer = state.answer_on_request.unwrap_or(PermissionStatus::Denied);
            state.permission = Some(answer);
            Ok(answer)
        }

        fn requires_channels(&self) -> bool {
            self.requires_channels
        }

        async fn create_channel(&self, channel: &ChannelSpec) -> Result<(), HostError> {
            let mut state = self.state.lock().unwrap();
            state.channels.retain(|c| c.id != channel.id);
            state.channels.push(channel.clone());
            Ok(())
        }

        async fn cancel_all_scheduled(&self) -> Result<(), HostError> {
            let mut state = self.state.lock().unwrap();
            state.cancel_calls += 1;
            if state.fail_cancel {
                return Err(HostError::Cancellation("mock cancel failure".to_string()));
            }
            state.triggers.clear();
            Ok(())
        }

        async fn schedule_repeating(
            &self,
            fire_time: FireTime,
            payload: &NotificationPayload,
        ) -> Result<TriggerId, HostError> {
            let mut state = self.state.lock().unwrap();
            state.schedule_calls += 1;
            if state.failing_slots.contains(&fire_time) {
                return Err(HostError::Registration {
                    fire_time,
                    reason: "mock registration failure".to_string(),
                });
            }
            state.next_id += 1;
            let id = format!("mock-{}", state.next_id);
            state.triggers.push(ScheduledTrigger {
                id: id.clone(),
                fire_time,
                payload: payload.clone(),
                repeats: true,
            });
            Ok(id)
        }

        async fn list_scheduled(&self) -> Result<Vec<ScheduledTrigger>, HostError> {
            Ok(self.state.lock().unwrap().triggers.clone())
        }
    }
}
