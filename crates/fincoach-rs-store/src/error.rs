//! Error types for the storage tiers.

use thiserror::Error;

/// Errors raised inside a storage tier.
///
/// None of these reach `AdviceStore` callers: the store logs and swallows
/// tier failures so the local result stays authoritative.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Local file read or write failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Encoding or decoding the stored collection failed.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Cloud request transport failed.
    #[error("cloud request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Cloud endpoint answered with a non-success status.
    #[error("cloud endpoint answered status {status}")]
    Status { status: u16 },
}
