//! Maintenance of the denormalized index record.
//!
//! The index lives as one serialized value under [`INDEX_KEY`]. Updates are
//! read-modify-write with no versioning: concurrent writers follow
//! last-writer-wins, an accepted limitation of this low-contention
//! namespace, so a racing save can drop another writer's index entry.

use crate::{EdgeError, KvStore};
use fincoach_rs_protocol::{AdviceRecord, INDEX_CAP, INDEX_KEY, IndexEntry};
use log::warn;

/// Read the current index, newest first. Absent or undecodable index data
/// degrades to empty.
pub fn read_index(kv: &dyn KvStore) -> Result<Vec<IndexEntry>, EdgeError> {
    let Some(raw) = kv.get(INDEX_KEY)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(index) => Ok(index),
        Err(err) => {
            warn!("discarding undecodable index: {err}");
            Ok(Vec::new())
        }
    }
}

/// Upsert a record's entry: drop any stale entry with the same id, prepend a
/// freshly derived one, truncate to the cap.
pub fn upsert_into_index(kv: &dyn KvStore, record: &AdviceRecord) -> Result<(), EdgeError> {
    let mut index = read_index(kv)?;
    index.retain(|entry| entry.id != record.id);
    index.insert(0, IndexEntry::from_record(record));
    index.truncate(INDEX_CAP);
    kv.put(INDEX_KEY, &serde_json::to_string(&index)?)
}

/// Remove a record's entry, if present. A missing index is a no-op.
pub fn remove_from_index(kv: &dyn KvStore, id: &str) -> Result<(), EdgeError> {
    let Some(raw) = kv.get(INDEX_KEY)? else {
        return Ok(());
    };
    let mut index: Vec<IndexEntry> = match serde_json::from_str(&raw) {
        Ok(index) => index,
        Err(err) => {
            warn!("discarding undecodable index: {err}");
            Vec::new()
        }
    };
    index.retain(|entry| entry.id != id);
    kv.put(INDEX_KEY, &serde_json::to_string(&index)?)
}
