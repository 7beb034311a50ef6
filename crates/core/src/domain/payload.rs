// Notification content and channel description

use serde::{Deserialize, Serialize};

/// Channel registered on hosts that group notifications into channels
pub const DEFAULT_CHANNEL_ID: &str = "default";

/// Static reminder content (not user configurable)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub sound: Option<String>,
}

impl NotificationPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            sound: None,
        }
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    /// The metacognition reminder sent at every fire time
    pub fn metacognition_reminder() -> Self {
        Self::new(
            "Are you thinking about your thinking?",
            "Pause for a moment and reflect.",
        )
        .with_sound("default")
    }
}

/// Channel importance as understood by the host; reminders only use the default level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importance {
    Default,
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Importance::Default => write!(f, "DEFAULT"),
        }
    }
}

impl std::str::FromStr for Importance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEFAULT" => Ok(Importance::Default),
            other => Err(format!("unknown importance: {}", other)),
        }
    }
}

/// Notification channel to create during initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSpec {
    pub id: String,
    pub name: String,
    pub importance: Importance,
}

impl ChannelSpec {
    pub fn default_channel() -> Self {
        Self {
            id: DEFAULT_CHANNEL_ID.to_string(),
            name: DEFAULT_CHANNEL_ID.to_string(),
            importance: Importance::Default,
        }
    }
}
