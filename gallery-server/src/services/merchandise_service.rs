//! Merchandise Service
//!
//! Discount computation for physical merchandise, gated by share ownership
//! and series completion. Factors are computed with `rust_decimal` so the
//! 0.05-per-buff steps never pick up binary-float drift before the final
//! floor.

use crate::common::{AppError, AppResult};
use crate::db::repository::{CopyrightRepository, SeriesRepository, ShareRepository};
use crate::services::{SeriesBuffService, parse_id};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Base discount for any share holder: pay 50%
const BASE_DISCOUNT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
/// Each active revenue buff shaves another 5% off
const BUFF_DISCOUNT_STEP: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
/// The discount never goes below paying 30%
const DISCOUNT_FLOOR: Decimal = Decimal::from_parts(3, 0, 0, false, 1);

#[derive(Clone)]
pub struct MerchandiseService {
    shares: ShareRepository,
    copyrights: CopyrightRepository,
    series: SeriesRepository,
    buffs: SeriesBuffService,
}

impl MerchandiseService {
    pub fn new(db: Surreal<Db>, buffs: SeriesBuffService) -> Self {
        Self {
            shares: ShareRepository::new(db.clone()),
            copyrights: CopyrightRepository::new(db.clone()),
            series: SeriesRepository::new(db),
            buffs,
        }
    }

    async fn discount_factor(&self, user_id: &str, copyright_id: &str) -> AppResult<Decimal> {
        let user = parse_id("user", user_id)?;
        let copyright_rid = parse_id("copyright", copyright_id)?;

        // No shares, no discount
        let owned = self.shares.count_for(&user, &copyright_rid).await?;
        if owned == 0 {
            return Ok(Decimal::ONE);
        }

        let copyright = self
            .copyrights
            .find_by_id(&copyright_rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Copyright {copyright_id} not found")))?;
        let series = self
            .series
            .find_by_id(&copyright.series)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Series {} not found", copyright.series)))?;

        // Buffs only deepen the discount once the owning series is complete
        if !self.buffs.is_complete(&user, &series).await? {
            return Ok(BASE_DISCOUNT);
        }

        let (revenue_buffs, _) = self.buffs.active_counts(&user).await?;
        let factor = BASE_DISCOUNT - BUFF_DISCOUNT_STEP * Decimal::from(revenue_buffs);
        Ok(factor.max(DISCOUNT_FLOOR))
    }

    /// Discount factor in [0.3, 1.0]; 1.0 means no discount.
    pub async fn calculate_discount(&self, user_id: &str, copyright_id: &str) -> AppResult<f64> {
        let factor = self.discount_factor(user_id, copyright_id).await?;
        Ok(factor.to_f64().unwrap_or(1.0))
    }

    /// `floor(original_price * discount)`
    pub async fn discounted_price(
        &self,
        user_id: &str,
        copyright_id: &str,
        original_price: i64,
    ) -> AppResult<i64> {
        if original_price < 0 {
            return Err(AppError::InvalidInput(format!(
                "Price must be non-negative, got {original_price}"
            )));
        }
        let factor = self.discount_factor(user_id, copyright_id).await?;
        (Decimal::from(original_price) * factor)
            .floor()
            .to_i64()
            .ok_or_else(|| AppError::InvalidInput("Price out of range".to_string()))
    }
}
