//! Domain enums and plain result payloads
//!
//! Everything here is framework-free serde data: the engines return these
//! structures and the boundary layer serializes them verbatim.

use serde::{Deserialize, Serialize};

/// Kind of reward box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxKind {
    /// Paid box, 100k coins per open
    Normal,
    /// One free box per local calendar day
    Free,
    /// One-shot completion reward per (user, series)
    Series,
}

/// Outcome category of a randomized reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    Coins,
    Fragment,
    Copyright,
    BuffCard,
    Coupon,
}

/// Buff flavor, inherited from the owning series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffType {
    Revenue,
    Game,
}

/// Merchandise development stage of a copyright
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MerchandiseStatus {
    Undeveloped,
    Developing,
    Online,
}

/// Merchandise coupon attached to a series-completion box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesCoupon {
    pub series_id: String,
    /// Discount factor applied to merchandise of the series (0.5 = half price)
    pub discount: f64,
}

/// Resolved reward of one box opening
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxReward {
    pub box_kind: BoxKind,
    pub reward_kind: RewardKind,
    /// Coin amount for coin rewards, fragment count for fragment rewards
    pub reward_value: i64,
    /// Present on copyright-share rewards
    pub copyright_id: Option<String>,
    /// Present on series-box rewards
    pub series_id: Option<String>,
    pub coupon: Option<SeriesCoupon>,
}

/// Aggregate view over a user's active buffs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuffEffects {
    pub revenue_buff_count: i64,
    pub game_buff_count: i64,
    /// 5% merchandise discount per active revenue buff
    pub revenue_discount: f64,
    /// 10% accrual speedup per active game buff (informational; the
    /// accrual engine consumes per-series flat bonuses instead)
    pub game_speed_multiplier: f64,
}

/// One share issued to a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareGrant {
    pub share_id: String,
    pub copyright_id: String,
    pub chain_hash: String,
}

/// Result of fragment synthesis for one (user, copyright) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisResult {
    pub shares_created: Vec<ShareGrant>,
    /// Fragments left over after synthesis (< 10)
    pub fragments_remaining: i64,
}

/// Reward resolved by one appreciation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppreciationReward {
    pub reward_kind: RewardKind,
    pub reward_value: i64,
}

/// One holder's dividend computed at settlement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendEntry {
    pub dividend_id: String,
    pub user_id: String,
    pub shares: i64,
    pub total_shares: i64,
    pub amount: i64,
}
