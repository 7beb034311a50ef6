// sqlx::Error mapping into core error types

use metacog_core::error::AppError;
use metacog_core::port::HostError;

/// Render a sqlx error with the SQLite result code when one is available
fn describe(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db_err) => match db_err.code() {
            // SQLite error codes: https://www.sqlite.org/rescode.html
            Some(code) => match code.as_ref() {
                "5" => format!("Database locked (SQLITE_BUSY): {}", db_err.message()),
                "13" => format!("Database full: {}", db_err.message()),
                "275" | "531" => format!("Check constraint violation: {}", db_err.message()),
                "1555" | "2067" => format!("Unique constraint violation: {}", db_err.message()),
                other => format!("Database error [{}]: {}", other, db_err.message()),
            },
            None => format!("Database error: {}", db_err.message()),
        },
        sqlx::Error::RowNotFound => "Row not found".to_string(),
        sqlx::Error::ColumnNotFound(col) => format!("Column not found: {}", col),
        // Connection, pool, protocol errors
        other => other.to_string(),
    }
}

/// Map for the settings store
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    AppError::Storage(describe(&err))
}

/// Map for the notification host journal
pub(crate) fn map_host_error(err: sqlx::Error) -> HostError {
    HostError::Unavailable(describe(&err))
}
