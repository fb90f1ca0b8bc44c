//! Dual-tier advice record storage.
//!
//! The local tier is the authoritative, synchronous path; the cloud tier is
//! a best-effort replica whose failures degrade silently to local-only
//! operation. Listing and lookup never consult the cloud.

mod cloud;
mod error;
mod local;
mod store;

pub use cloud::{CloudTier, EdgeClient};
pub use error::StoreError;
pub use local::LocalAdviceStore;
pub use store::AdviceStore;
