// SQLite NotificationHost Implementation
// Journals triggers for hosts without a native local-notification scheduler

use crate::error::map_host_error;
use async_trait::async_trait;
use metacog_core::domain::{ChannelSpec, FireTime, NotificationPayload};
use metacog_core::port::{
    HostError, IdProvider, NotificationHost, PermissionStatus, ScheduledTrigger, TimeProvider,
    TriggerId,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

/// Platform the host emulates; only Android groups notifications in channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Android,
    Ios,
    Desktop,
}

impl std::str::FromStr for HostPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "android" => Ok(HostPlatform::Android),
            "ios" => Ok(HostPlatform::Ios),
            "desktop" => Ok(HostPlatform::Desktop),
            other => Err(format!("unknown platform: {}", other)),
        }
    }
}

/// How a permission prompt is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionPolicy {
    Grant,
    Deny,
}

impl std::str::FromStr for PermissionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grant" => Ok(PermissionPolicy::Grant),
            "deny" => Ok(PermissionPolicy::Deny),
            other => Err(format!("unknown permission policy: {}", other)),
        }
    }
}

#[derive(sqlx::FromRow)]
struct TriggerRow {
    id: String,
    hour: i64,
    minute: i64,
    title: String,
    body: String,
    sound: Option<String>,
    repeats: i64,
}

impl TriggerRow {
    fn into_trigger(self) -> Result<ScheduledTrigger, HostError> {
        let hour = u8::try_from(self.hour).map_err(|_| {
            HostError::Unavailable(format!("trigger {} has hour {}", self.id, self.hour))
        })?;
        let minute = u8::try_from(self.minute).map_err(|_| {
            HostError::Unavailable(format!("trigger {} has minute {}", self.id, self.minute))
        })?;
        let fire_time =
            FireTime::new(hour, minute).map_err(|e| HostError::Unavailable(e.to_string()))?;
        Ok(ScheduledTrigger {
            id: self.id,
            fire_time,
            payload: NotificationPayload {
                title: self.title,
                body: self.body,
                sound: self.sound,
            },
            repeats: self.repeats != 0,
        })
    }
}

pub struct SqliteNotificationHost {
    pool: SqlitePool,
    platform: HostPlatform,
    permission_policy: PermissionPolicy,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteNotificationHost {
    pub fn new(
        pool: SqlitePool,
        platform: HostPlatform,
        permission_policy: PermissionPolicy,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            pool,
            platform,
            permission_policy,
            id_provider,
            time_provider,
        }
    }

    /// Channels created so far
    pub async fn channels(&self) -> Result<Vec<ChannelSpec>, HostError> {
        let rows: Vec<(String, String, String)> =
            sqlx::query_as("SELECT id, name, importance FROM notification_channels ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(map_host_error)?;

        rows.into_iter()
            .map(|(id, name, importance)| {
                let importance = importance.parse().map_err(HostError::Channel)?;
                Ok(ChannelSpec {
                    id,
                    name,
                    importance,
                })
            })
            .collect()
    }
}

#[async_trait]
impl NotificationHost for SqliteNotificationHost {
    async fn permission_status(&self) -> Result<PermissionStatus, HostError> {
        let status: Option<String> =
            sqlx::query_scalar("SELECT status FROM notification_permission WHERE id = 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(map_host_error)?;

        Ok(status
            .and_then(|s| s.parse().ok())
            .unwrap_or(PermissionStatus::Undetermined))
    }

    async fn request_permission(&self) -> Result<PermissionStatus, HostError> {
        let answer = match self.permission_policy {
            PermissionPolicy::Grant => PermissionStatus::Granted,
            PermissionPolicy::Deny => PermissionStatus::Denied,
        };

        sqlx::query(
            r#"
            INSERT INTO notification_permission (id, status, updated_at) VALUES (1, ?, ?)
            ON CONFLICT(id) DO UPDATE SET status = excluded.status, updated_at = excluded.updated_at
            "#,
        )
        .bind(answer.to_string())
        .bind(self.time_provider.now_millis())
        .execute(&self.pool)
        .await
        .map_err(map_host_error)?;

        debug!(status = %answer, "Permission prompt answered");
        Ok(answer)
    }

    fn requires_channels(&self) -> bool {
        self.platform == HostPlatform::Android
    }

    async fn create_channel(&self, channel: &ChannelSpec) -> Result<(), HostError> {
        sqlx::query(
            r#"
            INSERT INTO notification_channels (id, name, importance) VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET name = excluded.name, importance = excluded.importance
            "#,
        )
        .bind(&channel.id)
        .bind(&channel.name)
        .bind(channel.importance.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| HostError::Channel(e.to_string()))?;

        Ok(())
    }

    async fn cancel_all_scheduled(&self) -> Result<(), HostError> {
        let result = sqlx::query("DELETE FROM scheduled_triggers")
            .execute(&self.pool)
            .await
            .map_err(|e| HostError::Cancellation(e.to_string()))?;

        debug!(cancelled = result.rows_affected(), "Scheduled triggers cancelled");
        Ok(())
    }

    async fn schedule_repeating(
        &self,
        fire_time: FireTime,
        payload: &NotificationPayload,
    ) -> Result<TriggerId, HostError> {
        let id = self.id_provider.generate_id();

        sqlx::query(
            r#"
            INSERT INTO scheduled_triggers (id, hour, minute, title, body, sound, repeats, created_at)
            VALUES (?, ?, ?, ?, ?, ?, 1, ?)
            "#,
        )
        .bind(&id)
        .bind(i64::from(fire_time.hour))
        .bind(i64::from(fire_time.minute))
        .bind(&payload.title)
        .bind(&payload.body)
        .bind(&payload.sound)
        .bind(self.time_provider.now_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| HostError::Registration {
            fire_time,
            reason: e.to_string(),
        })?;

        Ok(id)
    }

    async fn list_scheduled(&self) -> Result<Vec<ScheduledTrigger>, HostError> {
        let rows = sqlx::query_as::<_, TriggerRow>(
            r#"
            SELECT id, hour, minute, title, body, sound, repeats
            FROM scheduled_triggers
            ORDER BY hour ASC, minute ASC, created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_host_error)?;

        rows.into_iter().map(TriggerRow::into_trigger).collect()
    }
}
