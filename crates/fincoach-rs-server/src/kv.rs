//! Key-value backends for the edge namespace.

use crate::EdgeError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// String key-value storage behind the edge service.
pub trait KvStore: Send + Sync {
    /// Fetch a value, `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, EdgeError>;
    /// Upsert a value.
    fn put(&self, key: &str, value: &str) -> Result<(), EdgeError>;
    /// Delete a key; absent keys are a no-op.
    fn delete(&self, key: &str) -> Result<(), EdgeError>;
}

/// In-memory KV, for tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKv {
    /// Create an empty in-memory KV.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, EdgeError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), EdgeError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), EdgeError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// File-per-key KV rooted at a directory.
#[derive(Debug)]
pub struct FileKv {
    root: PathBuf,
}

impl FileKv {
    /// Create a KV rooted at the given directory, creating it if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, EdgeError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Keys become filenames, so anything path-like is rejected.
    fn key_path(&self, key: &str) -> Result<PathBuf, EdgeError> {
        if key.is_empty()
            || key == "."
            || key == ".."
            || key.contains(['/', '\\'])
        {
            return Err(EdgeError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>, EdgeError> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), EdgeError> {
        fs::write(self.key_path(key)?, value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), EdgeError> {
        let path = self.key_path(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FileKv, KvStore, MemoryKv};
    use crate::EdgeError;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn exercise(kv: &dyn KvStore) {
        assert_eq!(kv.get("a").expect("get"), None);
        kv.put("a", "one").expect("put");
        kv.put("a", "two").expect("upsert");
        assert_eq!(kv.get("a").expect("get"), Some("two".to_string()));
        kv.delete("a").expect("delete");
        kv.delete("a").expect("idempotent delete");
        assert_eq!(kv.get("a").expect("get"), None);
    }

    #[test]
    fn memory_kv_round_trip() {
        exercise(&MemoryKv::new());
    }

    #[test]
    fn file_kv_round_trip() {
        let temp = tempdir().expect("tempdir");
        exercise(&FileKv::new(temp.path()).expect("kv"));
    }

    #[test]
    fn file_kv_rejects_path_like_keys() {
        let temp = tempdir().expect("tempdir");
        let kv = FileKv::new(temp.path()).expect("kv");
        for key in ["", ".", "..", "a/b", "a\\b"] {
            assert!(
                matches!(kv.put(key, "x"), Err(EdgeError::InvalidKey(_))),
                "key {key:?} must be rejected"
            );
        }
    }
}
