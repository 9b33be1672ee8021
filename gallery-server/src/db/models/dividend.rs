//! Dividend Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DividendStatus {
    Pending,
    Paid,
}

/// One holder's payout for one settlement of one copyright.
///
/// `shares`/`total_shares` are snapshots taken at settlement time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dividend {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user: RecordId,
    pub copyright: RecordId,
    pub amount: i64,
    pub shares: i64,
    pub total_shares: i64,
    pub status: DividendStatus,
    pub settlement_date: i64,
    #[serde(default)]
    pub paid_at: Option<i64>,
}
