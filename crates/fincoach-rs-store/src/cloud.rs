//! Cloud tier: best-effort replication to the edge key-value namespace.

use crate::StoreError;
use async_trait::async_trait;
use fincoach_rs_protocol::{AdviceRecord, IndexEntry};

/// Write seam for the secondary tier.
///
/// Implementations replicate records somewhere remote; the store composes
/// one of these behind a fire-and-forget path, so failures must be cheap to
/// report and safe to drop.
#[async_trait]
pub trait CloudTier: Send + Sync {
    /// Upsert a full record.
    async fn put(&self, record: &AdviceRecord) -> Result<(), StoreError>;
    /// Idempotently delete a record by id.
    async fn remove(&self, id: &str) -> Result<(), StoreError>;
}

/// HTTP client for the edge storage surface.
#[derive(Debug, Clone)]
pub struct EdgeClient {
    base_url: String,
    http: reqwest::Client,
}

impl EdgeClient {
    /// Create a client for the edge service at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Fetch a full record by id; `None` when the edge reports 404.
    pub async fn fetch(&self, id: &str) -> Result<Option<AdviceRecord>, StoreError> {
        let url = format!("{}/api/finance/get/{id}", self.base_url);
        let response = self.http.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check(response)?;
        Ok(Some(response.json().await?))
    }

    /// Fetch the remote index, newest first.
    pub async fn list_index(&self) -> Result<Vec<IndexEntry>, StoreError> {
        let url = format!("{}/api/finance/list", self.base_url);
        let response = Self::check(self.http.get(&url).send().await?)?;
        Ok(response.json().await?)
    }

    fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl CloudTier for EdgeClient {
    async fn put(&self, record: &AdviceRecord) -> Result<(), StoreError> {
        let url = format!("{}/api/finance/save", self.base_url);
        Self::check(self.http.post(&url).json(record).send().await?)?;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let url = format!("{}/api/finance/delete/{id}", self.base_url);
        Self::check(self.http.delete(&url).send().await?)?;
        Ok(())
    }
}
