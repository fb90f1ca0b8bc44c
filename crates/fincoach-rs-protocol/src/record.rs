//! Record and index-entry types.
//!
//! Field names on the wire stay camelCase (`formData`, `type`) so records and
//! index payloads remain interchangeable with the existing edge namespace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which prompt/summary template a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceType {
    /// Monthly budget planning.
    Budget,
    /// Savings goal planning.
    Saving,
    /// Purchase decision analysis.
    Purchase,
    /// Overall financial health diagnosis.
    Diagnosis,
}

/// One saved financial-advice result. Immutable once created; deletion is the
/// only other lifecycle transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRecord {
    /// Globally unique id, assigned at creation time.
    pub id: String,
    /// Advice category.
    #[serde(rename = "type")]
    pub kind: AdviceType,
    /// Form inputs the advice was generated from; shape depends on `kind`.
    #[serde(rename = "formData")]
    pub form_data: Map<String, Value>,
    /// Fully assembled markdown text from the streamed completion.
    pub response: String,
    /// Creation timestamp (RFC 3339 on the wire).
    pub timestamp: DateTime<Utc>,
}

/// Save input: a record before id and timestamp assignment. Which tier
/// materializes the draft decides the id policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceDraft {
    /// Caller-supplied id, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Advice category.
    #[serde(rename = "type")]
    pub kind: AdviceType,
    /// Form inputs the advice was generated from.
    #[serde(rename = "formData")]
    pub form_data: Map<String, Value>,
    /// Fully assembled markdown text.
    pub response: String,
    /// Caller-supplied timestamp, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Compact projection of a record used for listing without fetching bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Record id.
    pub id: String,
    /// Advice category.
    #[serde(rename = "type")]
    pub kind: AdviceType,
    /// Record creation timestamp.
    pub timestamp: DateTime<Utc>,
    /// Human-readable one-line summary derived from the form inputs.
    pub summary: String,
}

impl IndexEntry {
    /// Project a record into its index entry.
    pub fn from_record(record: &AdviceRecord) -> Self {
        Self {
            id: record.id.clone(),
            kind: record.kind,
            timestamp: record.timestamp,
            summary: crate::summarize(record.kind, &record.form_data),
        }
    }
}
