//! User Buff Model

use serde::{Deserialize, Serialize};
use shared::types::BuffType;
use surrealdb::RecordId;

/// Series-completion buff for one (user, series) pair.
///
/// Created on first completion, never deleted — only toggled via
/// `is_active` when completion is gained or lost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBuff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user: RecordId,
    pub series: RecordId,
    pub buff_type: BuffType,
    pub is_active: bool,
    pub activated_at: i64,
}
