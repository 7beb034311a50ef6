// Time Provider Port (for testability)

use chrono::NaiveTime;

/// Time provider interface (allows mocking in tests)
pub trait TimeProvider: Send + Sync {
    /// Get current time in milliseconds since epoch
    fn now_millis(&self) -> i64;

    /// Current wall-clock time of day on the device
    fn local_time_of_day(&self) -> NaiveTime;
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn local_time_of_day(&self) -> NaiveTime {
        chrono::Local::now().time()
    }
}

pub mod mocks {
    use super::*;

    /// Fixed clock for deterministic tests
    pub struct FixedTimeProvider {
        pub millis: i64,
        pub time_of_day: NaiveTime,
    }

    impl FixedTimeProvider {
        pub fn at(hour: u32, minute: u32) -> Self {
            Self {
                millis: 1_000_000,
                time_of_day: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN),
            }
        }
    }

    impl TimeProvider for FixedTimeProvider {
        fn now_millis(&self) -> i64 {
            self.millis
        }

        fn local_time_of_day(&self) -> NaiveTime {
            self.time_of_day
        }
    }
}
