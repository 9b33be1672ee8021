//! User Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// User entity (身份 + 钱包)
///
/// `gallery_coins` is a denormalized mirror of the gallery_coin ledger,
/// refreshed by every ledger mutation for cheap reads at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// External identity from the login provider, unique
    pub open_id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    /// Legacy currency, superseded by gallery coins
    #[serde(default)]
    pub coins: i64,
    #[serde(default)]
    pub gallery_coins: i64,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub experience: i64,
    /// Times this user's gallery was appreciated by others
    #[serde(default)]
    pub popularity: i64,
    #[serde(default)]
    pub last_online_time: Option<i64>,
    /// Gates the lower daily appreciation quota
    #[serde(default)]
    pub is_minor: bool,
    pub created_at: i64,
}

/// Create user payload (first login)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub open_id: String,
    pub name: String,
    pub avatar: Option<String>,
    pub is_minor: Option<bool>,
}
