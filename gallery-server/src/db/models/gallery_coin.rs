//! Gallery Coin Ledger Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Per-user accrual ledger, keyed deterministically by the user key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryCoin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user: RecordId,
    #[serde(default)]
    pub coins: i64,
    /// Last settlement instant; claims accrue from here
    #[serde(default)]
    pub last_claim_time: Option<i64>,
    /// Instant offline tracking began; cleared on each claim
    #[serde(default)]
    pub last_offline_time: Option<i64>,
}
