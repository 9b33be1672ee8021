//! Box Record Model

use serde::{Deserialize, Serialize};
use shared::types::{BoxKind, RewardKind};
use surrealdb::RecordId;

/// Immutable reward-event record, appended once per box opening.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user: RecordId,
    pub box_type: BoxKind,
    pub reward_type: RewardKind,
    /// Coin amount for coin rewards, share/card count otherwise
    pub reward_value: i64,
    #[serde(default)]
    pub copyright: Option<RecordId>,
    #[serde(default)]
    pub series: Option<RecordId>,
    pub created_at: i64,
}
