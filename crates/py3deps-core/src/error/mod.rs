//! Error types and result aliases for py3deps operations.
//!
//! Resolution itself never fails; these errors cover loading the inputs
//! (configuration, interpreter defaults, scan statistics) with actionable
//! messages.

use thiserror::Error;

use crate::types::VersionError;

/// Unified error type for all py3deps operations
#[derive(Error, Debug)]
pub enum Py3DepsError {
    // Config errors
    #[error("Failed to parse py3deps.toml: {message} at line {line}, column {column}")]
    TomlParse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Failed to parse scan statistics: {message}")]
    JsonParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    #[error("Invalid version '{input}'")]
    InvalidVersion {
        input: String,
        #[source]
        source: VersionError,
    },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for py3deps operations
pub type Py3DepsResult<T> = Result<T, Py3DepsError>;

impl Py3DepsError {
    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a version error for the given input
    pub fn version(input: impl Into<String>, source: VersionError) -> Self {
        Self::InvalidVersion {
            input: input.into(),
            source,
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Py3DepsError::TomlParse { .. } => Some("Check py3deps.toml syntax near the reported location"),
            Py3DepsError::JsonParse { .. } => {
                Some("Scan statistics must be JSON with versions written as \"X.Y\" strings")
            },
            Py3DepsError::InvalidVersion { .. } => {
                Some("Use X.Y for versions and X.Y-A.B, X.Y-, -A.B or \">= X.Y, << A.B\" for ranges")
            },
            Py3DepsError::ConfigValidation { .. } => Some("Fix the reported field and try again"),
            Py3DepsError::Io { .. } => None,
        }
    }
}
