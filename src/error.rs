//! Error types for the dump loader

use std::path::PathBuf;

use thiserror::Error;

use crate::models::LoadSummary;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),

    /// A phase could not read its dump; `summary` holds the phases that ran
    #[error("Initial load incomplete: {source}")]
    Incomplete {
        summary: Box<LoadSummary>,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// I/O failures only abort the phase reading the dump, not the whole load.
    pub fn is_io(&self) -> bool {
        matches!(self, AppError::Io { .. })
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Reason a single dump line was skipped
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("line is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    #[error("no JSON object on line")]
    NoJsonObject,

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid date {value:?}: {reason}")]
    InvalidDate { value: String, reason: String },
}

impl From<serde_json::Error> for LineError {
    fn from(e: serde_json::Error) -> Self {
        LineError::InvalidJson(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_is_phase_local() {
        let err = AppError::io(
            "/tmp/missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_io());
        assert!(err.to_string().contains("/tmp/missing.txt"));

        assert!(!AppError::Internal("boom".to_string()).is_io());
    }

    #[test]
    fn test_line_error_display() {
        assert_eq!(
            LineError::MissingField("key").to_string(),
            "missing field `key`"
        );
    }
}
