//! Fan-out composition of the two storage tiers.

use crate::{CloudTier, LocalAdviceStore, StoreError};
use chrono::Utc;
use fincoach_rs_protocol::{AdviceDraft, AdviceRecord, generate_record_id};
use log::{debug, warn};
use std::path::Path;
use std::sync::Arc;

/// Bounded, ordered advice collection across the local and cloud tiers.
///
/// The local tier is awaited and authoritative for every call's outcome; the
/// cloud tier is written on a detached task whose failure is only logged.
/// Cloud writes from different calls may race with no ordering guarantee.
pub struct AdviceStore {
    local: LocalAdviceStore,
    cloud: Option<Arc<dyn CloudTier>>,
}

impl AdviceStore {
    /// Create a store replicating to the given cloud tier.
    pub fn new(
        local_path: impl AsRef<Path>,
        cloud: Arc<dyn CloudTier>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            local: LocalAdviceStore::new(local_path)?,
            cloud: Some(cloud),
        })
    }

    /// Create a local-only store.
    pub fn without_cloud(local_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self {
            local: LocalAdviceStore::new(local_path)?,
            cloud: None,
        })
    }

    /// Materialize and persist a new record.
    ///
    /// Assigns id and timestamp when the caller omitted them, prepends to
    /// the local collection (evicting the oldest past the cap), then
    /// replicates to the cloud tier best-effort. Local persistence failures
    /// are logged, not surfaced; the returned record is always produced.
    pub async fn save(&self, draft: AdviceDraft) -> AdviceRecord {
        let record = AdviceRecord {
            id: draft.id.unwrap_or_else(generate_record_id),
            kind: draft.kind,
            form_data: draft.form_data,
            response: draft.response,
            timestamp: draft.timestamp.unwrap_or_else(Utc::now),
        };

        if let Err(err) = self.local.insert(record.clone()) {
            warn!("local persistence failed, record not durable: {err}");
        }

        if let Some(cloud) = &self.cloud {
            let cloud = Arc::clone(cloud);
            let replica = record.clone();
            tokio::spawn(async move {
                if let Err(err) = cloud.put(&replica).await {
                    warn!("cloud sync failed, record kept local-only: {err}");
                } else {
                    debug!("record replicated to cloud (id={})", replica.id);
                }
            });
        }

        record
    }

    /// The local collection, most recent first. The cloud index is never
    /// consulted on the read path.
    pub fn list(&self) -> Vec<AdviceRecord> {
        self.local.list()
    }

    /// Lookup by id in the local collection.
    pub fn get_by_id(&self, id: &str) -> Option<AdviceRecord> {
        self.local.get(id)
    }

    /// Remove a record from both tiers. Absent ids are a no-op locally; the
    /// cloud delete is idempotent and best-effort.
    pub async fn delete(&self, id: &str) {
        match self.local.remove(id) {
            Ok(removed) => debug!("local delete (id={id}, removed={removed})"),
            Err(err) => warn!("local delete failed: {err}"),
        }

        if let Some(cloud) = &self.cloud {
            let cloud = Arc::clone(cloud);
            let id = id.to_string();
            tokio::spawn(async move {
                if let Err(err) = cloud.remove(&id).await {
                    warn!("cloud delete failed (id={id}): {err}");
                }
            });
        }
    }
}
