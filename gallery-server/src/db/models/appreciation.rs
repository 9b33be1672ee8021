//! Appreciation Model

use serde::{Deserialize, Serialize};
use shared::types::RewardKind;
use surrealdb::RecordId;

/// Append-only log of one user viewing another's gallery, with the
/// randomized reward outcome. Daily quotas count these records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appreciation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user: RecordId,
    pub target_user: RecordId,
    pub copyright: RecordId,
    pub watch_duration: i64,
    pub reward_type: RewardKind,
    pub reward_value: i64,
    pub created_at: i64,
}
