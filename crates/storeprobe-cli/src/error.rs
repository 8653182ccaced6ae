//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storeprobe library error
    #[error("{0}")]
    Probe(#[from] storeprobe::ProbeError),

    /// Output serialization error
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Narration could not run
    #[error("Narration failed: {message}")]
    Narration {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a narration error
    #[must_use]
    pub fn narration(message: impl Into<String>) -> Self {
        Self::Narration {
            message: message.into(),
        }
    }
}
