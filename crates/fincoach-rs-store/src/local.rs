//! Local tier: one JSON file holding the full ordered collection.
//!
//! Mirrors the semantics of a browser localStorage slot: every operation is
//! a read-modify-write of the whole collection, read failures degrade to an
//! empty collection, and the newest record sits at the front.

use crate::StoreError;
use fincoach_rs_protocol::{AdviceRecord, LOCAL_CAP};
use log::warn;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed local record collection, capped at [`LOCAL_CAP`] entries.
pub struct LocalAdviceStore {
    /// Collection file path.
    path: PathBuf,
    /// Serialize read-modify-write cycles so no two local writes interleave.
    write_lock: Mutex<()>,
}

impl LocalAdviceStore {
    /// Create a store backed by the given file, creating parent directories
    /// as needed. The file itself is created lazily on first insert.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Prepend a record and truncate the collection to the cap, evicting the
    /// oldest entry when exceeded.
    pub fn insert(&self, record: AdviceRecord) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        let mut records = self.load();
        records.insert(0, record);
        records.truncate(LOCAL_CAP);
        self.persist(&records)
    }

    /// Remove the record with the given id. Returns whether anything was
    /// removed; an absent id is a no-op.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock();
        let mut records = self.load();
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.persist(&records)?;
        Ok(true)
    }

    /// The full collection, most recent first.
    pub fn list(&self) -> Vec<AdviceRecord> {
        self.load()
    }

    /// Linear lookup by id.
    pub fn get(&self, id: &str) -> Option<AdviceRecord> {
        self.load().into_iter().find(|record| record.id == id)
    }

    /// Read the collection, degrading to empty on any failure.
    fn load(&self) -> Vec<AdviceRecord> {
        if !self.path.exists() {
            return Vec::new();
        }
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("failed to read local collection: {err}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!("failed to decode local collection: {err}");
                Vec::new()
            }
        }
    }

    fn persist(&self, records: &[AdviceRecord]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
