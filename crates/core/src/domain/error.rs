// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid interval: {0} minutes (expected 1..=1440)")]
    InvalidInterval(u32),

    #[error("Invalid quiet hour {field}: {value} (expected 0..=23)")]
    InvalidQuietHour { field: &'static str, value: u8 },

    #[error("Invalid fire time: {hour:02}:{minute:02}")]
    InvalidFireTime { hour: u8, minute: u8 },
}

pub type Result<T> = std::result::Result<T, DomainError>;
