//! Shared test doubles and fixtures for the fincoach crates.

mod cloud;
mod completion;

pub use cloud::{FailingCloudTier, RecordingCloudTier};
pub use completion::{
    spawn_completion_server, spawn_failing_completion_server, sse_body, sse_event,
};
