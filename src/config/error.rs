//! Configuration error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or merging configuration sources failed
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Sources loaded but did not deserialize into `Settings`
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// Settings deserialized but hold an unusable value
    #[error("invalid configuration: {field}: {reason}")]
    Invalid { field: String, reason: String },
}
