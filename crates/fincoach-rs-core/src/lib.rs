//! Streaming advice generation: the SSE decoder and the chat-completion
//! client that drives it.

mod client;
mod error;
mod sse;

pub use client::{AdviceClient, AdviceStream};
pub use error::AdviceError;
pub use sse::SseDecoder;
