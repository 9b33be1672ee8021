//! Copyright Share Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// One unit share of a copyright — one document per share.
///
/// Ownership counts for a (user, copyright) pair are always derived by
/// counting these documents, which keeps concurrent acquisitions off any
/// shared counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Share {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user: RecordId,
    pub copyright: RecordId,
    /// Simulated on-chain hash, globally unique per share
    pub chain_hash: String,
    #[serde(default)]
    pub in_lottery_pool: bool,
    /// Transfer count, capped at 3
    #[serde(default)]
    pub gift_count: i32,
    pub created_at: i64,
}
