//! Result and error types for storeprobe.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for storeprobe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur in storeprobe
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Filesystem operation failed on a specific path
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path the operation was working on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Invalid configuration value
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Speech synthesis failed
    #[error("Speech synthesis failed: {message}")]
    Speech {
        /// Provider-supplied detail
        message: String,
    },

    /// Audio/video mux failed
    #[error("Audio/video merge failed: {message}")]
    Mux {
        /// Error message
        message: String,
    },

    /// HTTP transport error
    #[cfg(feature = "narration")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ProbeError {
    /// Wrap an I/O error with the path it happened on
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a speech synthesis error
    #[must_use]
    pub fn speech(message: impl Into<String>) -> Self {
        Self::Speech {
            message: message.into(),
        }
    }

    /// Create a mux error
    #[must_use]
    pub fn mux(message: impl Into<String>) -> Self {
        Self::Mux {
            message: message.into(),
        }
    }
}
