//! Copyright Model

use serde::{Deserialize, Serialize};
use shared::types::MerchandiseStatus;
use surrealdb::RecordId;

/// Copyright entity — one collectible pattern
///
/// `sold_shares` is the issuance counter; ownership itself is derived by
/// counting share documents, never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Copyright {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Owning series (exactly one)
    pub series: RecordId,
    pub name: String,
    /// Fixed issuance capacity, 300–1000
    pub total_shares: i64,
    #[serde(default)]
    pub sold_shares: i64,
    pub price: i64,
    pub merchandise_status: MerchandiseStatus,
}

/// Create copyright payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyrightCreate {
    pub series: RecordId,
    pub name: String,
    pub total_shares: i64,
    pub price: i64,
    pub merchandise_status: Option<MerchandiseStatus>,
}
