//! Error types for advice generation.

use thiserror::Error;

/// Errors surfaced by the advice client.
///
/// Malformed stream frames are not represented here: the decoder recovers
/// from them locally and they never abort a generation.
#[derive(Debug, Error)]
pub enum AdviceError {
    /// No complete endpoint/credential/model configuration was provided.
    #[error("model endpoint is not configured")]
    ConfigMissing,
    /// The completion endpoint answered with a non-success status.
    #[error("completion request failed with status {status}")]
    Upstream { status: u16 },
    /// Request construction, connection, or stream transfer failed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
