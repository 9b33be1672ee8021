//! Appreciation Service
//!
//! Rate-limited social loop: viewing another user's gallery rolls a small
//! randomized reward for the viewer and raises the owner's popularity.

use crate::common::{AppError, AppResult};
use crate::db::models::Appreciation;
use crate::db::repository::{
    AppreciationRepository, CopyrightRepository, FragmentRepository, GalleryCoinRepository,
    UserRepository,
};
use crate::services::parse_id;
use rand::Rng;
use shared::types::{AppreciationReward, RewardKind};
use shared::util::{local_day_bounds, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Views shorter than this earn nothing
const MIN_WATCH_DURATION: i64 = 5;
/// Daily appreciation quota
const DAILY_LIMIT_ADULT: i64 = 10;
const DAILY_LIMIT_MINOR: i64 = 5;
/// Reward distribution: [0, 0.4) fragments, [0.4, 0.9) coins, rest buff card
const FRAGMENT_MASS: f64 = 0.4;
const COIN_MASS_CEILING: f64 = 0.9;
/// Coin rewards are uniform in [1_000, 6_000)
const COIN_REWARD_MIN: i64 = 1_000;
const COIN_REWARD_MAX: i64 = 6_000;
/// Fragment rewards are uniform in 1..=3
const FRAGMENT_REWARD_MAX: i64 = 3;
/// Popularity cost of one shipping-voucher exchange
const POPULARITY_EXCHANGE_COST: i64 = 100;

enum Roll {
    Fragments(i64),
    Coins(i64),
    BuffCard,
}

fn roll_reward<R: Rng>(rng: &mut R) -> Roll {
    let r = rng.r#gen::<f64>();
    if r < FRAGMENT_MASS {
        Roll::Fragments(rng.gen_range(1..=FRAGMENT_REWARD_MAX))
    } else if r < COIN_MASS_CEILING {
        Roll::Coins(rng.gen_range(COIN_REWARD_MIN..COIN_REWARD_MAX))
    } else {
        Roll::BuffCard
    }
}

#[derive(Clone)]
pub struct AppreciationService {
    users: UserRepository,
    copyrights: CopyrightRepository,
    fragments: FragmentRepository,
    ledgers: GalleryCoinRepository,
    appreciations: AppreciationRepository,
}

impl AppreciationService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            copyrights: CopyrightRepository::new(db.clone()),
            fragments: FragmentRepository::new(db.clone()),
            ledgers: GalleryCoinRepository::new(db.clone()),
            appreciations: AppreciationRepository::new(db),
        }
    }

    /// Appreciate one artwork in another user's gallery.
    ///
    /// Rejects self-appreciation, short views, exceeding the daily quota
    /// (10 for adults, 5 for minors) and repeating the same (target,
    /// artwork) the same day. On success the viewer's reward is rolled and
    /// applied, the event is logged, and the owner gains one popularity.
    pub async fn appreciate(
        &self,
        user_id: &str,
        target_user_id: &str,
        copyright_id: &str,
        watch_duration: i64,
    ) -> AppResult<AppreciationReward> {
        if user_id == target_user_id {
            return Err(AppError::InvalidInput(
                "Cannot appreciate your own gallery".to_string(),
            ));
        }
        if watch_duration < MIN_WATCH_DURATION {
            return Err(AppError::InvalidInput(format!(
                "Watch duration must be at least {MIN_WATCH_DURATION} seconds"
            )));
        }

        let user_rid = parse_id("user", user_id)?;
        let target_rid = parse_id("user", target_user_id)?;
        let copyright_rid = parse_id("copyright", copyright_id)?;

        let user = self
            .users
            .find_by_id(&user_rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
        self.users
            .find_by_id(&target_rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {target_user_id} not found")))?;
        self.copyrights
            .find_by_id(&copyright_rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Copyright {copyright_id} not found")))?;

        let now = now_millis();
        let (start, end) = local_day_bounds(now);
        let today = self
            .appreciations
            .count_in_window(&user_rid, start, end)
            .await?;
        let limit = if user.is_minor {
            DAILY_LIMIT_MINOR
        } else {
            DAILY_LIMIT_ADULT
        };
        if today >= limit {
            return Err(AppError::QuotaExceeded(format!(
                "Daily appreciation limit of {limit} reached"
            )));
        }
        if self
            .appreciations
            .exists_in_window(&user_rid, &target_rid, &copyright_rid, start, end)
            .await?
        {
            return Err(AppError::QuotaExceeded(
                "Already appreciated this artwork today".to_string(),
            ));
        }

        let (reward_kind, reward_value) = match roll_reward(&mut rand::thread_rng()) {
            Roll::Fragments(n) => {
                self.fragments.add(&user_rid, &copyright_rid, n).await?;
                (RewardKind::Fragment, n)
            }
            Roll::Coins(amount) => {
                self.ledgers.credit(&user_rid, amount).await?;
                (RewardKind::Coins, amount)
            }
            // Placeholder outcome: logged but grants nothing yet
            Roll::BuffCard => (RewardKind::BuffCard, 1),
        };

        self.appreciations
            .append(Appreciation {
                id: None,
                user: user_rid.clone(),
                target_user: target_rid.clone(),
                copyright: copyright_rid,
                watch_duration,
                reward_type: reward_kind,
                reward_value,
                created_at: now,
            })
            .await?;
        self.users.add_popularity(&target_rid, 1).await?;

        tracing::info!(
            user = %user_rid,
            target = %target_rid,
            reward = ?reward_kind,
            "Gallery appreciated"
        );
        Ok(AppreciationReward {
            reward_kind,
            reward_value,
        })
    }

    /// Trade 100 popularity for a shipping voucher. The voucher issuance is
    /// handled by an external fulfilment system; only the debit happens
    /// here.
    pub async fn exchange_popularity_reward(&self, user_id: &str) -> AppResult<()> {
        let user = parse_id("user", user_id)?;
        self.users
            .find_by_id(&user)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

        if !self
            .users
            .try_debit_popularity(&user, POPULARITY_EXCHANGE_COST)
            .await?
        {
            return Err(AppError::QuotaExceeded(format!(
                "Popularity below the exchange threshold of {POPULARITY_EXCHANGE_COST}"
            )));
        }

        tracing::info!(user = %user, "Popularity exchanged for shipping voucher");
        Ok(())
    }
}
