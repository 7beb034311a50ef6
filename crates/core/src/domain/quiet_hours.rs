// Quiet Hours - daily window during which no reminder fires

use serde::{Deserialize, Serialize};

/// Hours in a day
pub const HOURS_PER_DAY: u8 = 24;

/// Check whether `hour` falls inside the half-open window `[start, end)`.
///
/// - `start < end`: quiet iff `start <= hour < end`
/// - `start >= end`: the window crosses midnight, quiet iff `hour >= start || hour < end`
///
/// Equal bounds fall into the crossing rule, so every hour is quiet.
pub fn is_quiet(hour: u8, start: u8, end: u8) -> bool {
    if start < end {
        hour >= start && hour < end
    } else {
        hour >= start || hour < end
    }
}

/// Quiet window expressed in hours of the local wall clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuietHours {
    pub start: u8,
    pub end: u8,
}

impl QuietHours {
    pub fn new(start: u8, end: u8) -> Self {
        Self { start, end }
    }

    pub fn is_quiet(&self, hour: u8) -> bool {
        is_quiet(hour, self.start, self.end)
    }

    /// Equal bounds silence the whole day
    pub fn is_all_day(&self) -> bool {
        self.start == self.end
    }

    /// Number of hours of the day covered by the window
    pub fn quiet_hour_count(&self) -> usize {
        (0..HOURS_PER_DAY).filter(|h| self.is_quiet(*h)).count()
    }
}

impl Default for QuietHours {
    fn default() -> Self {
        Self { start: 23, end: 8 }
    }
}

impl std::fmt::Display for QuietHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:00-{:02}:00", self.start, self.end)
    }
}
