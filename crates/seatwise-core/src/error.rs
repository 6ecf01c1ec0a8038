//! Error types for Seatwise core library.

use std::path::PathBuf;

/// Errors raised while validating input, loading reference tables and
/// calling upstream services.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Request input failed validation (missing or out-of-range fields)
    #[error("Validation error: {message}")]
    Validation {
        /// Field or aspect that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// An upstream collaborator (LLM, search, image) failed
    #[error("Upstream error: {message}")]
    Upstream {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A static reference table is missing or unreadable
    #[error("Failed to load data table {}: {message}", path.display())]
    DataLoad {
        /// Path of the table that failed to load
        path: PathBuf,
        /// What went wrong
        message: String,
    },

    /// The requested standard is not tabulated
    #[error("Unknown standard: {id}")]
    UnknownStandard {
        /// Identifier as supplied by the caller
        id: String,
    },

    /// I/O error (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Upstream call exceeded its deadline
    #[error("Upstream call timed out after {seconds}s")]
    Timeout {
        /// Timeout duration in seconds
        seconds: u64,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Convenience `Result` type alias for Seatwise operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. } | Error::UnknownStandard { .. }
        )
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new upstream error with a message.
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Error::Upstream {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new upstream error with a message and source error.
    pub fn upstream_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Upstream {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new data-load error for the given table path.
    pub fn data_load<P, S>(path: P, message: S) -> Self
    where
        P: Into<PathBuf>,
        S: Into<String>,
    {
        Error::DataLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
