//! Cloud-tier doubles.

use async_trait::async_trait;
use fincoach_rs_protocol::AdviceRecord;
use fincoach_rs_store::{CloudTier, StoreError};
use parking_lot::Mutex;
use std::time::Duration;

/// Cloud tier that records every call and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingCloudTier {
    /// Records received via `put`, in call order.
    pub puts: Mutex<Vec<AdviceRecord>>,
    /// Ids received via `remove`, in call order.
    pub removes: Mutex<Vec<String>>,
}

impl RecordingCloudTier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until at least `count` puts have arrived. The store replicates
    /// on a detached task, so observers have to poll. Panics after two
    /// seconds.
    pub async fn wait_for_puts(&self, count: usize) -> Vec<AdviceRecord> {
        for _ in 0..200 {
            {
                let puts = self.puts.lock();
                if puts.len() >= count {
                    return puts.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("timed out waiting for {count} cloud puts");
    }

    /// Wait until at least `count` removes have arrived. Panics after two
    /// seconds.
    pub async fn wait_for_removes(&self, count: usize) -> Vec<String> {
        for _ in 0..200 {
            {
                let removes = self.removes.lock();
                if removes.len() >= count {
                    return removes.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("timed out waiting for {count} cloud removes");
    }
}

#[async_trait]
impl CloudTier for RecordingCloudTier {
    async fn put(&self, record: &AdviceRecord) -> Result<(), StoreError> {
        self.puts.lock().push(record.clone());
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        self.removes.lock().push(id.to_string());
        Ok(())
    }
}

/// Cloud tier that fails every call with the given status.
#[derive(Debug)]
pub struct FailingCloudTier {
    status: u16,
}

impl FailingCloudTier {
    /// Fail with a specific status code.
    pub fn new(status: u16) -> Self {
        Self { status }
    }
}

impl Default for FailingCloudTier {
    /// Service-unavailable by default.
    fn default() -> Self {
        Self::new(503)
    }
}

#[async_trait]
impl CloudTier for FailingCloudTier {
    async fn put(&self, _record: &AdviceRecord) -> Result<(), StoreError> {
        Err(StoreError::Status {
            status: self.status,
        })
    }

    async fn remove(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Status {
            status: self.status,
        })
    }
}
