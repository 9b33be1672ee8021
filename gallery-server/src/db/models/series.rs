//! Series Model

use serde::{Deserialize, Serialize};
use shared::types::BuffType;
use surrealdb::RecordId;

/// Series entity — a named collection of 4 to 8 copyrights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Member copyrights; every id must reference an existing copyright
    #[serde(default)]
    pub copyright_ids: Vec<RecordId>,
    /// Flat bonus added to the accrual rate while the series buff is active
    #[serde(default)]
    pub hourly_bonus_coins: i64,
    /// Legacy buff descriptor; still stamped onto activated buffs
    pub buff_type: BuffType,
    #[serde(default)]
    pub buff_effect: Option<String>,
}

/// Create series payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesCreate {
    pub name: String,
    pub description: Option<String>,
    pub hourly_bonus_coins: i64,
    pub buff_type: BuffType,
    pub buff_effect: Option<String>,
}
