//! Series Buff Service
//!
//! Detects series completion (owning at least one share of every copyright
//! in a series), toggles the per-(user, series) buff, and aggregates active
//! buffs into the effect numbers consumed by the accrual and discount
//! engines.

use crate::common::{AppError, AppResult};
use crate::db::models::Series;
use crate::db::repository::{SeriesRepository, ShareRepository, UserBuffRepository};
use crate::services::parse_id;
use shared::types::{BuffEffects, BuffType};
use shared::util::now_millis;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Merchandise discount contributed by each active revenue buff
const REVENUE_DISCOUNT_STEP: f64 = 0.05;
/// Accrual speedup contributed by each active game buff (informational;
/// the accrual engine consumes per-series flat bonuses instead)
const GAME_SPEED_STEP: f64 = 0.1;

#[derive(Clone)]
pub struct SeriesBuffService {
    series: SeriesRepository,
    shares: ShareRepository,
    buffs: UserBuffRepository,
}

impl SeriesBuffService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            series: SeriesRepository::new(db.clone()),
            shares: ShareRepository::new(db.clone()),
            buffs: UserBuffRepository::new(db),
        }
    }

    // =========================================================================
    // Completion detection
    // =========================================================================

    /// Whether `user` owns at least one share of every copyright in `series`.
    /// An empty series is never complete.
    pub(crate) async fn is_complete(&self, user: &RecordId, series: &Series) -> AppResult<bool> {
        if series.copyright_ids.is_empty() {
            return Ok(false);
        }
        let owned = self.shares.owned_in(user, &series.copyright_ids).await?;
        Ok(owned.len() == series.copyright_ids.len())
    }

    pub async fn is_series_complete(&self, user_id: &str, series_id: &str) -> AppResult<bool> {
        let user = parse_id("user", user_id)?;
        let series_rid = parse_id("series", series_id)?;
        let series = self
            .series
            .find_by_id(&series_rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Series {series_id} not found")))?;
        self.is_complete(&user, &series).await
    }

    /// Owned-vs-required progress for one (user, series) pair
    pub async fn completion_progress(
        &self,
        user_id: &str,
        series_id: &str,
    ) -> AppResult<(usize, usize)> {
        let user = parse_id("user", user_id)?;
        let series_rid = parse_id("series", series_id)?;
        let series = self
            .series
            .find_by_id(&series_rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Series {series_id} not found")))?;
        let owned = self.shares.owned_in(&user, &series.copyright_ids).await?;
        Ok((owned.len(), series.copyright_ids.len()))
    }

    // =========================================================================
    // Activation
    // =========================================================================

    /// Activate the series buff if the user just completed the series.
    ///
    /// Idempotent once active: returns true without re-stamping
    /// `activated_at`. Incomplete series returns false with no write.
    pub async fn check_and_activate(&self, user_id: &str, series_id: &str) -> AppResult<bool> {
        let user = parse_id("user", user_id)?;
        let series_rid = parse_id("series", series_id)?;
        let series = self
            .series
            .find_by_id(&series_rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Series {series_id} not found")))?;

        if let Some(buff) = self.buffs.find(&user, &series_rid).await?
            && buff.is_active
        {
            return Ok(true);
        }

        if !self.is_complete(&user, &series).await? {
            return Ok(false);
        }

        self.buffs
            .activate(&user, &series_rid, series.buff_type, now_millis())
            .await?;
        tracing::info!(user = %user, series = %series_rid, "Series buff activated");
        Ok(true)
    }

    /// Re-sync the buff with actual ownership after shares move (gifting,
    /// synthesis, purchase). Activates on new completion, deactivates a
    /// stale buff whose series is no longer complete.
    pub(crate) async fn refresh_for(&self, user: &RecordId, series_id: &RecordId) -> AppResult<()> {
        let Some(series) = self.series.find_by_id(series_id).await? else {
            return Ok(());
        };
        let complete = self.is_complete(user, &series).await?;
        let buff = self.buffs.find(user, series_id).await?;

        match (complete, buff) {
            (true, Some(b)) if !b.is_active => {
                self.buffs
                    .activate(user, series_id, series.buff_type, now_millis())
                    .await?;
            }
            (true, None) => {
                self.buffs
                    .activate(user, series_id, series.buff_type, now_millis())
                    .await?;
            }
            (false, Some(b)) if b.is_active => {
                self.buffs.deactivate(user, series_id).await?;
                tracing::info!(user = %user, series = %series_id, "Series buff deactivated");
            }
            _ => {}
        }
        Ok(())
    }

    // =========================================================================
    // Aggregation
    // =========================================================================

    /// Active buffs partitioned into (revenue, game) counts
    pub(crate) async fn active_counts(&self, user: &RecordId) -> AppResult<(i64, i64)> {
        let buffs = self.buffs.find_active(user).await?;
        let revenue = buffs
            .iter()
            .filter(|b| b.buff_type == BuffType::Revenue)
            .count() as i64;
        let game = buffs.len() as i64 - revenue;
        Ok((revenue, game))
    }

    /// Aggregate effect numbers over all of the user's active buffs
    pub async fn get_user_buff_effects(&self, user_id: &str) -> AppResult<BuffEffects> {
        let user = parse_id("user", user_id)?;
        let (revenue, game) = self.active_counts(&user).await?;
        Ok(BuffEffects {
            revenue_buff_count: revenue,
            game_buff_count: game,
            revenue_discount: revenue as f64 * REVENUE_DISCOUNT_STEP,
            game_speed_multiplier: 1.0 + game as f64 * GAME_SPEED_STEP,
        })
    }

    /// Sum of `hourly_bonus_coins` over every series with an active buff;
    /// this is the flat bonus the accrual engine adds un-multiplied.
    pub(crate) async fn active_hourly_bonus(&self, user: &RecordId) -> AppResult<i64> {
        let buffs = self.buffs.find_active(user).await?;
        let mut bonus = 0;
        for buff in &buffs {
            if let Some(series) = self.series.find_by_id(&buff.series).await? {
                bonus += series.hourly_bonus_coins;
            }
        }
        Ok(bonus)
    }
}
