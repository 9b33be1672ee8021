//! Dividend Service
//!
//! Periodic revenue sharing: 20% of a sales amount is split across holders
//! proportionally to their share counts, snapshotted at settlement.

use crate::common::{AppError, AppResult};
use crate::db::models::{Dividend, DividendStatus};
use crate::db::repository::{CopyrightRepository, DividendRepository, ShareRepository};
use crate::services::parse_id;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use shared::types::DividendEntry;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Fraction of the sales amount distributed to holders
const REVENUE_SHARE_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

fn dividend_amount(sales_amount: i64, shares: i64, total_shares: i64) -> i64 {
    if shares <= 0 || total_shares <= 0 {
        return 0;
    }
    (Decimal::from(sales_amount) * REVENUE_SHARE_RATE * Decimal::from(shares)
        / Decimal::from(total_shares))
    .floor()
    .to_i64()
    .unwrap_or(0)
}

#[derive(Clone)]
pub struct DividendService {
    shares: ShareRepository,
    copyrights: CopyrightRepository,
    dividends: DividendRepository,
}

impl DividendService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            shares: ShareRepository::new(db.clone()),
            copyrights: CopyrightRepository::new(db.clone()),
            dividends: DividendRepository::new(db),
        }
    }

    /// One user's dividend for one sales amount. Zero shares short-circuits
    /// to zero without touching the copyright.
    pub async fn calculate_dividend(
        &self,
        user_id: &str,
        copyright_id: &str,
        sales_amount: i64,
    ) -> AppResult<i64> {
        if sales_amount < 0 {
            return Err(AppError::InvalidInput(format!(
                "Sales amount must be non-negative, got {sales_amount}"
            )));
        }
        let user = parse_id("user", user_id)?;
        let copyright_rid = parse_id("copyright", copyright_id)?;

        let shares = self.shares.count_for(&user, &copyright_rid).await?;
        if shares == 0 {
            return Ok(0);
        }

        let copyright = self
            .copyrights
            .find_by_id(&copyright_rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Copyright {copyright_id} not found")))?;

        Ok(dividend_amount(sales_amount, shares, copyright.total_shares))
    }

    /// Settle one period: group shares by holder and insert one pending
    /// dividend per holder with a positive amount. The fan-out is
    /// sequential, not atomic across users — a mid-loop failure leaves the
    /// records created so far (at-least-once settlement).
    pub async fn settle_dividend(
        &self,
        copyright_id: &str,
        sales_amount: i64,
        settlement_date: i64,
    ) -> AppResult<Vec<DividendEntry>> {
        if sales_amount < 0 {
            return Err(AppError::InvalidInput(format!(
                "Sales amount must be non-negative, got {sales_amount}"
            )));
        }
        let copyright_rid = parse_id("copyright", copyright_id)?;
        let copyright = self
            .copyrights
            .find_by_id(&copyright_rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Copyright {copyright_id} not found")))?;

        let holders = self.shares.group_by_user(&copyright_rid).await?;
        let mut entries = Vec::new();

        for holder in holders {
            let amount = dividend_amount(sales_amount, holder.share_count, copyright.total_shares);
            if amount <= 0 {
                continue;
            }
            let created = self
                .dividends
                .create(Dividend {
                    id: None,
                    user: holder.user.clone(),
                    copyright: copyright_rid.clone(),
                    amount,
                    shares: holder.share_count,
                    total_shares: copyright.total_shares,
                    status: DividendStatus::Pending,
                    settlement_date,
                    paid_at: None,
                })
                .await?;
            entries.push(DividendEntry {
                dividend_id: created.id.map(|id| id.to_string()).unwrap_or_default(),
                user_id: holder.user.to_string(),
                shares: holder.share_count,
                total_shares: copyright.total_shares,
                amount,
            });
        }

        tracing::info!(
            copyright = %copyright_rid,
            holders = entries.len(),
            sales_amount,
            "Dividend settled"
        );
        Ok(entries)
    }

    /// Mark one pending dividend paid. The actual funds transfer belongs to
    /// an external payment rail and is not performed here.
    pub async fn pay_dividend(&self, dividend_id: &str) -> AppResult<()> {
        let rid = parse_id("dividend", dividend_id)?;
        self.dividends
            .find_by_id(&rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Dividend {dividend_id} not found")))?;

        if !self.dividends.try_mark_paid(&rid, now_millis()).await? {
            return Err(AppError::InvalidInput(format!(
                "Dividend {dividend_id} is not pending"
            )));
        }
        Ok(())
    }

    /// Pay every pending dividend sequentially; prior successes stand if a
    /// later one fails. Returns the number paid.
    pub async fn batch_pay_dividends(&self) -> AppResult<usize> {
        let pending = self.dividends.find_pending().await?;
        let mut paid = 0;
        for dividend in pending {
            let Some(id) = dividend.id else { continue };
            if self.dividends.try_mark_paid(&id, now_millis()).await? {
                paid += 1;
            }
        }
        tracing::info!(paid, "Batch dividend payout finished");
        Ok(paid)
    }
}
