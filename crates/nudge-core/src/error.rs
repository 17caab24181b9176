//! Error types for the reminder library.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong in the reminder core.
#[derive(Error, Debug)]
pub enum NudgeError {
    /// A SQLite statement failed; `message` names the operation.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: u64 },
    /// The database directory could not be created.
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// No XDG data directory could be resolved.
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// A user-supplied value was rejected.
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Calendar or time zone arithmetic failed
    #[error("Time error: {source}")]
    Time {
        #[from]
        source: jiff::Error,
    },
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Pending [`NudgeError::InvalidInput`] for a named field; finish it with
/// [`InvalidInputBuilder::with_reason`].
#[must_use]
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    pub fn with_reason(self, reason: impl Into<String>) -> NudgeError {
        NudgeError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl NudgeError {
    /// Starts an input error, e.g. `NudgeError::invalid_input("minutes")`.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder {
            field: field.into(),
        }
    }

    /// A blocking-pool job that panicked or was cancelled.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Blocking database job failed: {error}"),
        }
    }
}

/// Attaches a message to rusqlite failures.
pub trait DatabaseResultExt<T> {
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|source| NudgeError::Database {
            message: message.to_string(),
            source,
        })
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, NudgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let err = NudgeError::invalid_input("minutes").with_reason("must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'minutes': must be positive"
        );
    }

    #[test]
    fn test_db_context_wraps_source() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.db_context("Failed to load task").unwrap_err();
        assert!(matches!(err, NudgeError::Database { .. }));
        assert!(err.to_string().contains("Failed to load task"));
    }

    #[test]
    fn test_time_errors_convert() {
        fn thirteenth_month() -> Result<jiff::civil::Date> {
            Ok(jiff::civil::Date::new(2026, 13, 1)?)
        }
        let err = thirteenth_month().unwrap_err();
        assert!(matches!(err, NudgeError::Time { .. }));
        assert!(err.to_string().starts_with("Time error:"));
    }
}
