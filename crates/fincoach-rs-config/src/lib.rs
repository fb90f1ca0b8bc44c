//! Model-endpoint configuration: schema, validation, and the file-backed
//! store with its remote-refresh seam.
//!
//! Resolution is explicit rather than ambient: callers hold a `ConfigStore`,
//! ask it to `resolve()`, and pass the resulting `ModelConfig` into the
//! advice client.

mod error;
mod model;
mod store;

/// Public error type returned by config loading and persistence APIs.
pub use error::ConfigError;
/// Configuration schema.
pub use model::ModelConfig;
/// File-backed store and the remote bootstrap seam.
pub use store::{ConfigStore, RemoteConfigSource};
