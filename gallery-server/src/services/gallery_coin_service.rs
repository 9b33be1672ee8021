//! Gallery Coin Service
//!
//! The passive-income accrual engine. Settlement is pull-based: no ticking
//! scheduler exists, earned coins are computed from elapsed wall-clock time
//! whenever the user claims.

use crate::common::{AppError, AppResult};
use crate::db::repository::{
    GalleryCoinRepository, ShareRepository, UserRepository,
};
use crate::services::{SeriesBuffService, parse_id};
use shared::util::{elapsed_hours, now_millis};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Distinct copyrights per rate step
const RATE_STEP_COPYRIGHTS: i64 = 5;
/// Coins per hour granted by each full step
const RATE_PER_STEP: i64 = 10_000;
/// Offline accrual is capped at this many hours per claim
const OFFLINE_CAP_HOURS: i64 = 12;

#[derive(Clone)]
pub struct GalleryCoinService {
    users: UserRepository,
    ledgers: GalleryCoinRepository,
    shares: ShareRepository,
    buffs: SeriesBuffService,
}

impl GalleryCoinService {
    pub fn new(db: Surreal<Db>, buffs: SeriesBuffService) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            ledgers: GalleryCoinRepository::new(db.clone()),
            shares: ShareRepository::new(db),
            buffs,
        }
    }

    // =========================================================================
    // Rate
    // =========================================================================

    /// Hourly accrual rate.
    ///
    /// Ownership is binary per copyright: five shares of one pattern count
    /// once. Below five distinct copyrights the rate is a hard zero — no
    /// partial credit. Active series buffs add their flat hourly bonus on
    /// top, un-multiplied.
    pub async fn calculate_rate(&self, user_id: &str) -> AppResult<i64> {
        let user = parse_id("user", user_id)?;
        self.rate_for(&user).await
    }

    pub(crate) async fn rate_for(&self, user: &RecordId) -> AppResult<i64> {
        let distinct = self.shares.distinct_copyrights(user).await?.len() as i64;
        let base = (distinct / RATE_STEP_COPYRIGHTS) * RATE_PER_STEP;
        let bonus = self.buffs.active_hourly_bonus(user).await?;
        Ok(base + bonus)
    }

    // =========================================================================
    // Settlement
    // =========================================================================

    /// Settle accrued coins since the last claim.
    ///
    /// Accrual hours are the floor of online elapsed time (against the last
    /// settlement, falling back to the user's last online instant, then now)
    /// plus the floor of offline elapsed time capped at 12 hours. The two
    /// windows are summed as-is even though they can overlap — that matches
    /// the deployed behavior and is pinned by the test suite.
    ///
    /// Zero accrual hours is an idempotent no-op. Otherwise the ledger
    /// credit, the settlement stamp and the user mirror land in one
    /// transaction.
    pub async fn claim(&self, user_id: &str) -> AppResult<i64> {
        let user_rid = parse_id("user", user_id)?;
        let user = self
            .users
            .find_by_id(&user_rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

        let now = now_millis();
        let ledger = self.ledgers.find_or_create(&user_rid).await?;

        let last_claim = ledger
            .last_claim_time
            .or(user.last_online_time)
            .unwrap_or(now);
        let online_hours = elapsed_hours(last_claim, now);
        let offline_hours = ledger
            .last_offline_time
            .map(|at| elapsed_hours(at, now).min(OFFLINE_CAP_HOURS))
            .unwrap_or(0);

        let total_hours = online_hours + offline_hours;
        if total_hours <= 0 {
            return Ok(0);
        }

        let rate = self.rate_for(&user_rid).await?;
        let earned = rate * total_hours;
        let balance = self.ledgers.settle_claim(&user_rid, earned, now).await?;

        tracing::info!(
            user = %user_rid,
            earned,
            balance,
            online_hours,
            offline_hours,
            "Gallery coins claimed"
        );
        Ok(earned)
    }

    /// Mark the start of an offline window. Called by the boundary when a
    /// client session ends; nothing in this crate triggers it.
    pub async fn record_offline_time(&self, user_id: &str) -> AppResult<()> {
        let user = parse_id("user", user_id)?;
        let now = now_millis();
        self.ledgers.mark_offline(&user, now).await?;
        self.users.set_last_online(&user, now).await?;
        Ok(())
    }

    /// Current ledger balance (zero before the first touch)
    pub async fn balance(&self, user_id: &str) -> AppResult<i64> {
        let user = parse_id("user", user_id)?;
        Ok(self.ledgers.find(&user).await?.map(|l| l.coins).unwrap_or(0))
    }
}
