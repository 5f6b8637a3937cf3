//! Error types
//!
//! Segmentation itself never fails: every operation is total over its input.
//! The only errors are configuration errors, raised eagerly when a config is
//! built or loaded rather than discovered halfway through a document.

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_size` was zero
    #[error("max_size must be greater than 0")]
    ZeroMaxSize,

    /// Overlap does not leave room for new content
    #[error("overlap ({overlap}) must be smaller than max_size ({max_size})")]
    OverlapTooLarge {
        /// Requested overlap in characters
        overlap: usize,
        /// Requested maximum chunk size in characters
        max_size: usize,
    },

    /// Minimum chunk size above the maximum
    #[error("min_size ({min_size}) must not exceed max_size ({max_size})")]
    MinAboveMax {
        /// Requested minimum chunk size in characters
        min_size: usize,
        /// Requested maximum chunk size in characters
        max_size: usize,
    },

    /// A single named value is out of its allowed range
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Configuration key
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// TOML could not be parsed into a configuration
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// Configuration could not be rendered as TOML
    #[error("failed to serialize configuration: {0}")]
    Serialize(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err.to_string())
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
