//! Edge storage service: a key-value namespace of advice records plus a
//! single denormalized index record, exposed over a small CORS-friendly
//! HTTP surface.

mod error;
mod index;
mod kv;
mod routes;

pub use error::EdgeError;
pub use index::{read_index, remove_from_index, upsert_into_index};
pub use kv::{FileKv, KvStore, MemoryKv};
pub use routes::{EdgeState, router, serve};
