//! Wire types shared by the advice client, the store tiers, and the edge
//! service: records, index entries, and id/summary derivation.

mod id;
mod record;
mod summary;

pub use id::{generate_edge_id, generate_record_id};
pub use record::{AdviceDraft, AdviceRecord, AdviceType, IndexEntry};
pub use summary::summarize;

/// Maximum number of full records retained by the local tier.
pub const LOCAL_CAP: usize = 50;
/// Maximum number of entries retained by the remote index.
pub const INDEX_CAP: usize = 100;
/// Well-known key the remote index record is stored under.
pub const INDEX_KEY: &str = "finance_index";
