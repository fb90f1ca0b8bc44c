//! Error types for config loading and persistence.

use thiserror::Error;

/// Errors returned while loading, persisting, or refreshing config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing a config file failed.
    #[error("failed to access config: {0}")]
    Io(#[from] std::io::Error),
    /// Encoding or decoding a config file failed.
    #[error("failed to decode config: {0}")]
    Decode(#[from] serde_json::Error),
    /// The remote bootstrap source failed.
    #[error("remote config fetch failed: {0}")]
    RemoteFetch(String),
}
