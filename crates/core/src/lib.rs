// Metacog Core - Reminder scheduling domain, ports and use cases
// NO infrastructure dependencies (storage and notification host are ports)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};
