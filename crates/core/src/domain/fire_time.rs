// Fire Times - the daily (hour, minute) slots a repeating reminder is registered at

use crate::domain::error::{DomainError, Result};
use crate::domain::quiet_hours::{QuietHours, HOURS_PER_DAY};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

const MINUTES_PER_HOUR: u32 = 60;

/// Wall-clock slot at which a repeating trigger fires every day.
///
/// Ordered by hour, then minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FireTime {
    pub hour: u8,
    pub minute: u8,
}

impl FireTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour >= HOURS_PER_DAY || u32::from(minute) >= MINUTES_PER_HOUR {
            return Err(DomainError::InvalidFireTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }
}

impl std::fmt::Display for FireTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Compute every daily fire time for an interval and quiet window.
///
/// Walks each hour 0..=23 and, inside it, minutes `0, interval, 2*interval, ...`
/// below 60. Steps never carry into the next hour, so an interval of 60 or more
/// yields one slot per hour at minute 0 and an interval that does not divide 60
/// restarts at minute 0 every hour. Slots in quiet hours are skipped.
///
/// The result is ascending; this is the registration order.
pub fn compute_fire_times(interval_minutes: u32, quiet: QuietHours) -> Vec<FireTime> {
    if interval_minutes == 0 {
        return Vec::new();
    }

    let mut times = Vec::new();
    for hour in 0..HOURS_PER_DAY {
        if quiet.is_quiet(hour) {
            continue;
        }
        for minute in (0..MINUTES_PER_HOUR).step_by(interval_minutes as usize) {
            times.push(FireTime {
                hour,
                minute: minute as u8,
            });
        }
    }
    times
}

/// Number of triggers a full reconcile registers for these inputs
pub fn daily_slot_count(interval_minutes: u32, quiet: QuietHours) -> usize {
    if interval_minutes == 0 {
        return 0;
    }
    let per_hour = MINUTES_PER_HOUR.div_ceil(interval_minutes) as usize;
    let active_hours = usize::from(HOURS_PER_DAY) - quiet.quiet_hour_count();
    per_hour * active_hours
}

/// First fire time strictly after `now`, wrapping to the next day.
///
/// `fire_times` must be ascending, as returned by [`compute_fire_times`].
pub fn next_fire_time(fire_times: &[FireTime], now: NaiveTime) -> Option<FireTime> {
    let now_minute = FireTime {
        hour: now.hour() as u8,
        minute: now.minute() as u8,
    };
    fire_times
        .iter()
        .find(|t| **t > now_minute)
        .or_else(|| fire_times.first())
        .copied()
}
