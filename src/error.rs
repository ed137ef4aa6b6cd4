//! Unified error types for simulcast

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for simulcast operations
#[derive(Error, Debug)]
pub enum SimulcastError {
    /// Broadcaster executable missing from disk
    #[error("Broadcaster executable not found: {0}")]
    ExecutableNotFound(PathBuf),

    /// A stream key field was left empty
    #[error("Missing stream key for {platform}")]
    MissingCredentials { platform: String },

    /// Device-listing tool could not be invoked
    ///
    /// Absorbed at the enumerator boundary; callers of `enumerate()`
    /// never see this variant.
    #[error("Device listing tool unavailable: {0}")]
    DeviceToolUnavailable(#[from] std::io::Error),

    /// File read/write failure with the path that failed
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration file could not be parsed
    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Result type alias for simulcast operations
pub type Result<T> = std::result::Result<T, SimulcastError>;

impl SimulcastError {
    /// Create an I/O error with the offending path attached
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a missing-credentials error naming the platform
    pub fn missing_credentials(platform: impl Into<String>) -> Self {
        Self::MissingCredentials {
            platform: platform.into(),
        }
    }

    /// Whether the user can fix this by editing input and retrying
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            SimulcastError::ExecutableNotFound(_) | SimulcastError::MissingCredentials { .. }
        )
    }
}
