//! Box Service
//!
//! Weighted-random reward resolution for the three box kinds. Every opening
//! is cost check → reward roll → apply → append an immutable box record.

use crate::common::{AppError, AppResult};
use crate::db::models::BoxRecord;
use crate::db::repository::{
    BoxRecordRepository, CopyrightRepository, GalleryCoinRepository, SeriesRepository,
    ShareRepository, UserRepository,
};
use crate::services::{SeriesBuffService, parse_id};
use rand::Rng;
use shared::types::{BoxKind, BoxReward, RewardKind, SeriesCoupon};
use shared::util::{local_day_bounds, now_millis};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Price of a normal box, debited from the gallery-coin ledger
const NORMAL_BOX_COST: i64 = 100_000;
/// Probability mass of the coin branch in a normal box
const COIN_MASS: f64 = 0.7;
/// Coin rewards are uniform in [COIN_REWARD_MIN, COIN_REWARD_MAX)
const COIN_REWARD_MIN: i64 = 10_000;
const COIN_REWARD_MAX: i64 = 60_000;
/// Merchandise discount attached to a series-completion coupon
const SERIES_COUPON_DISCOUNT: f64 = 0.5;

/// Whether a normal-box roll lands in the coin branch
fn rolls_coins<R: Rng>(rng: &mut R) -> bool {
    rng.r#gen::<f64>() < COIN_MASS
}

fn roll_coin_amount<R: Rng>(rng: &mut R) -> i64 {
    rng.gen_range(COIN_REWARD_MIN..COIN_REWARD_MAX)
}

#[derive(Clone)]
pub struct BoxService {
    users: UserRepository,
    ledgers: GalleryCoinRepository,
    copyrights: CopyrightRepository,
    shares: ShareRepository,
    series: SeriesRepository,
    boxes: BoxRecordRepository,
    buffs: SeriesBuffService,
}

impl BoxService {
    pub fn new(db: Surreal<Db>, buffs: SeriesBuffService) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            ledgers: GalleryCoinRepository::new(db.clone()),
            copyrights: CopyrightRepository::new(db.clone()),
            shares: ShareRepository::new(db.clone()),
            series: SeriesRepository::new(db.clone()),
            boxes: BoxRecordRepository::new(db),
            buffs,
        }
    }

    async fn require_user(&self, user_id: &str) -> AppResult<RecordId> {
        let user = parse_id("user", user_id)?;
        self.users
            .find_by_id(&user)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
        Ok(user)
    }

    // =========================================================================
    // Normal box
    // =========================================================================

    /// Open a paid box: debit first (conditional, no partial debit), then
    /// roll. 70% coins, 30% a share of a random copyright with remaining
    /// capacity; capacity exhaustion — including a lost reservation race —
    /// is absorbed into the coin branch, never an error.
    pub async fn open_normal_box(&self, user_id: &str) -> AppResult<BoxReward> {
        let user = self.require_user(user_id).await?;

        if self
            .ledgers
            .try_debit(&user, NORMAL_BOX_COST)
            .await?
            .is_none()
        {
            return Err(AppError::Insufficient(format!(
                "Insufficient gallery coins: normal box costs {NORMAL_BOX_COST}"
            )));
        }

        let coin_branch = rolls_coins(&mut rand::thread_rng());
        let reward = if coin_branch {
            self.grant_coins(&user, BoxKind::Normal).await?
        } else {
            let available = self.copyrights.find_available().await?;
            if available.is_empty() {
                self.grant_coins(&user, BoxKind::Normal).await?
            } else {
                let pick = rand::thread_rng().gen_range(0..available.len());
                let copyright = &available[pick];
                let copyright_id = copyright
                    .id
                    .clone()
                    .ok_or_else(|| AppError::Database("Copyright missing id".to_string()))?;
                if self.copyrights.try_reserve_shares(&copyright_id, 1).await? {
                    self.grant_share(&user, &copyright_id).await?
                } else {
                    self.grant_coins(&user, BoxKind::Normal).await?
                }
            }
        };

        tracing::info!(user = %user, reward = ?reward.reward_kind, "Normal box opened");
        Ok(reward)
    }

    async fn grant_coins(&self, user: &RecordId, kind: BoxKind) -> AppResult<BoxReward> {
        let amount = roll_coin_amount(&mut rand::thread_rng());
        self.ledgers.credit(user, amount).await?;
        self.boxes
            .append(BoxRecord {
                id: None,
                user: user.clone(),
                box_type: kind,
                reward_type: RewardKind::Coins,
                reward_value: amount,
                copyright: None,
                series: None,
                created_at: now_millis(),
            })
            .await?;
        Ok(BoxReward {
            box_kind: kind,
            reward_kind: RewardKind::Coins,
            reward_value: amount,
            copyright_id: None,
            series_id: None,
            coupon: None,
        })
    }

    async fn grant_share(&self, user: &RecordId, copyright: &RecordId) -> AppResult<BoxReward> {
        self.shares.issue(user, copyright).await?;
        self.boxes
            .append(BoxRecord {
                id: None,
                user: user.clone(),
                box_type: BoxKind::Normal,
                reward_type: RewardKind::Copyright,
                reward_value: 1,
                copyright: Some(copyright.clone()),
                series: None,
                created_at: now_millis(),
            })
            .await?;
        Ok(BoxReward {
            box_kind: BoxKind::Normal,
            reward_kind: RewardKind::Copyright,
            reward_value: 1,
            copyright_id: Some(copyright.to_string()),
            series_id: None,
            coupon: None,
        })
    }

    // =========================================================================
    // Free box
    // =========================================================================

    /// One free box per server-local calendar day; always coins.
    pub async fn claim_free_box(&self, user_id: &str) -> AppResult<BoxReward> {
        let user = self.require_user(user_id).await?;

        let (start, end) = local_day_bounds(now_millis());
        let claimed = self
            .boxes
            .count_in_window(&user, BoxKind::Free, start, end)
            .await?;
        if claimed > 0 {
            return Err(AppError::QuotaExceeded(
                "Free box already claimed today".to_string(),
            ));
        }

        let amount = roll_coin_amount(&mut rand::thread_rng());
        self.ledgers.credit(&user, amount).await?;
        self.boxes
            .append(BoxRecord {
                id: None,
                user: user.clone(),
                box_type: BoxKind::Free,
                reward_type: RewardKind::Coins,
                reward_value: amount,
                copyright: None,
                series: None,
                created_at: now_millis(),
            })
            .await?;

        tracing::info!(user = %user, amount, "Free box claimed");
        Ok(BoxReward {
            box_kind: BoxKind::Free,
            reward_kind: RewardKind::Coins,
            reward_value: amount,
            copyright_id: None,
            series_id: None,
            coupon: None,
        })
    }

    // =========================================================================
    // Series box
    // =========================================================================

    /// One-shot completion reward per (user, series): a buff card with an
    /// attached half-price merchandise coupon for the series. No currency
    /// or share effect.
    pub async fn claim_series_box(&self, user_id: &str, series_id: &str) -> AppResult<BoxReward> {
        let user = self.require_user(user_id).await?;
        let series_rid = parse_id("series", series_id)?;
        let series = self
            .series
            .find_by_id(&series_rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Series {series_id} not found")))?;

        if !self.buffs.is_complete(&user, &series).await? {
            return Err(AppError::Insufficient(format!(
                "Series {series_id} is not complete"
            )));
        }
        if self.boxes.has_series_box(&user, &series_rid).await? {
            return Err(AppError::QuotaExceeded(
                "Series box already claimed".to_string(),
            ));
        }

        self.boxes
            .append(BoxRecord {
                id: None,
                user: user.clone(),
                box_type: BoxKind::Series,
                reward_type: RewardKind::BuffCard,
                reward_value: 1,
                copyright: None,
                series: Some(series_rid.clone()),
                created_at: now_millis(),
            })
            .await?;

        tracing::info!(user = %user, series = %series_rid, "Series box claimed");
        Ok(BoxReward {
            box_kind: BoxKind::Series,
            reward_kind: RewardKind::BuffCard,
            reward_value: 1,
            copyright_id: None,
            series_id: Some(series_rid.to_string()),
            coupon: Some(SeriesCoupon {
                series_id: series_rid.to_string(),
                discount: SERIES_COUPON_DISCOUNT,
            }),
        })
    }
}
