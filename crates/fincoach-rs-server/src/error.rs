//! Error types for the edge service.

use thiserror::Error;

/// Errors raised by KV access and index maintenance.
#[derive(Debug, Error)]
pub enum EdgeError {
    /// Backing storage failed.
    #[error("kv io error: {0}")]
    Io(#[from] std::io::Error),
    /// A stored value failed to encode or decode.
    #[error("kv decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// A key is not usable by the backing store.
    #[error("invalid key: {0}")]
    InvalidKey(String),
}
