//! Error types for tabex

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tabex
///
/// An empty row set or an unknown format is not an error; those come back
/// as an [`ExportOutcome`](crate::export::ExportOutcome). Everything here
/// propagates to the caller unchanged.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A caller-supplied column formatter failed
    #[error("Formatter for column '{column}' failed: {source}")]
    Formatter {
        column: String,
        #[source]
        source: anyhow::Error,
    },

    /// The download sink rejected the artifact
    #[error("Sink error: {0}")]
    Sink(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Column preset not found
    #[error("Unknown column preset: {0}")]
    UnknownPreset(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ExportError>,
    },
}

impl ExportError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ExportError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Wrap a formatter failure for the given column
    pub fn formatter(column: impl Into<String>, source: anyhow::Error) -> Self {
        ExportError::Formatter {
            column: column.into(),
            source,
        }
    }
}

/// Result type alias for tabex
pub type Result<T> = std::result::Result<T, ExportError>;
