//! Record id generation.

use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of the random suffix on client-generated ids.
const SUFFIX_LEN: usize = 9;

/// Generate a collision-resistant record id: millisecond timestamp prefix
/// plus a short random alphanumeric suffix, e.g. `advice_1700000000000_k3f9x1q7b`.
pub fn generate_record_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|byte| char::from(byte.to_ascii_lowercase()))
        .collect();
    format!("advice_{}_{suffix}", Utc::now().timestamp_millis())
}

/// Generate a server-assigned id for edge saves that arrive without one.
pub fn generate_edge_id() -> String {
    format!("advice_{}", Utc::now().timestamp_millis())
}
