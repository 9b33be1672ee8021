//! Copyright Fragment Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Fragment balance for one (user, copyright) pair.
///
/// Stored under a deterministic composite record key so concurrent reward
/// grants upsert the same document; 10 fragments synthesize into one share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user: RecordId,
    pub copyright: RecordId,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub updated_at: i64,
}
