//! File-backed config store with an explicit remote-refresh seam.
//!
//! Two slots under one directory: `config.json` holds the user-entered
//! config, `config_remote.json` caches the last successfully fetched remote
//! config. A complete user config always wins during resolution.

use crate::{ConfigError, ModelConfig};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Filename of the user-entered config slot.
const USER_CONFIG_FILE: &str = "config.json";
/// Filename of the remote-fetched config cache.
const REMOTE_CONFIG_FILE: &str = "config_remote.json";

/// Source of the remotely provisioned fallback config.
///
/// Credential retrieval and decryption happen behind this seam; the store
/// only cares about the decoded result.
#[async_trait]
pub trait RemoteConfigSource: Send + Sync {
    /// Fetch the remote config, `None` when the source has nothing usable.
    async fn fetch(&self) -> Result<Option<ModelConfig>, ConfigError>;
}

/// File-backed store for the two config slots.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    /// Create a store rooted at the given directory, creating it if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Load the user-entered config slot, `None` when absent.
    pub fn load_user(&self) -> Result<Option<ModelConfig>, ConfigError> {
        self.read_slot(USER_CONFIG_FILE)
    }

    /// Persist the user-entered config slot.
    pub fn save_user(&self, config: &ModelConfig) -> Result<(), ConfigError> {
        self.write_slot(USER_CONFIG_FILE, config)?;
        info!("saved user model config (model={})", config.model_name);
        Ok(())
    }

    /// Resolve the effective config: a complete user config wins, otherwise
    /// the cached remote config. Unreadable slots degrade to `None`.
    pub fn resolve(&self) -> Option<ModelConfig> {
        match self.load_user() {
            Ok(Some(config)) if config.is_complete() => return Some(config),
            Ok(_) => {}
            Err(err) => warn!("unreadable user config, falling back: {err}"),
        }
        match self.read_slot(REMOTE_CONFIG_FILE) {
            Ok(slot) => slot,
            Err(err) => {
                warn!("unreadable remote config cache: {err}");
                None
            }
        }
    }

    /// Fetch from the remote source and cache the result when it is complete.
    ///
    /// Returns the fetched config, or `None` when the source had nothing
    /// usable. A cache-write failure is surfaced; the fetch already succeeded
    /// so callers may still use the returned value.
    pub async fn refresh(
        &self,
        source: &dyn RemoteConfigSource,
    ) -> Result<Option<ModelConfig>, ConfigError> {
        let Some(config) = source.fetch().await? else {
            debug!("remote config source returned nothing");
            return Ok(None);
        };
        if !config.is_complete() {
            warn!("remote config is incomplete, discarding");
            return Ok(None);
        }
        self.write_slot(REMOTE_CONFIG_FILE, &config)?;
        info!("cached remote model config (model={})", config.model_name);
        Ok(Some(config))
    }

    fn slot_path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    fn read_slot(&self, file: &str) -> Result<Option<ModelConfig>, ConfigError> {
        let path = self.slot_path(file);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write_slot(&self, file: &str, config: &ModelConfig) -> Result<(), ConfigError> {
        let raw = serde_json::to_string_pretty(config)?;
        fs::write(self.slot_path(file), raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigStore, RemoteConfigSource};
    use crate::{ConfigError, ModelConfig};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    struct FixedSource(Option<ModelConfig>);

    #[async_trait]
    impl RemoteConfigSource for FixedSource {
        async fn fetch(&self) -> Result<Option<ModelConfig>, ConfigError> {
            Ok(self.0.clone())
        }
    }

    fn complete(model: &str) -> ModelConfig {
        ModelConfig::new("https://api.example.com/v1", "sk-test", model)
    }

    #[test]
    fn resolve_prefers_complete_user_config() {
        let temp = tempdir().expect("tempdir");
        let store = ConfigStore::new(temp.path()).expect("store");
        store.save_user(&complete("user-model")).expect("save");
        assert_eq!(store.resolve(), Some(complete("user-model")));
    }

    #[test]
    fn resolve_is_none_when_nothing_stored() {
        let temp = tempdir().expect("tempdir");
        let store = ConfigStore::new(temp.path()).expect("store");
        assert_eq!(store.resolve(), None);
    }

    #[tokio::test]
    async fn refresh_caches_remote_config_for_fallback() {
        let temp = tempdir().expect("tempdir");
        let store = ConfigStore::new(temp.path()).expect("store");

        let fetched = store
            .refresh(&FixedSource(Some(complete("remote-model"))))
            .await
            .expect("refresh");
        assert_eq!(fetched, Some(complete("remote-model")));

        // No user config: resolution falls back to the cached remote slot.
        assert_eq!(store.resolve(), Some(complete("remote-model")));

        // An incomplete user config does not shadow the remote cache.
        store
            .save_user(&ModelConfig::new("", "", ""))
            .expect("save");
        assert_eq!(store.resolve(), Some(complete("remote-model")));
    }

    #[tokio::test]
    async fn refresh_discards_incomplete_remote_config() {
        let temp = tempdir().expect("tempdir");
        let store = ConfigStore::new(temp.path()).expect("store");

        let fetched = store
            .refresh(&FixedSource(Some(ModelConfig::new("url-only", "", ""))))
            .await
            .expect("refresh");
        assert_eq!(fetched, None);
        assert_eq!(store.resolve(), None);
    }
}
