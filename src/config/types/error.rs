//! Configuration error type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating `storymap.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0}")]
    Validation(String),
}
