//! Copyright Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Copyright, CopyrightCreate};
use shared::types::MerchandiseStatus;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "copyright";

#[derive(Clone)]
pub struct CopyrightRepository {
    base: BaseRepository,
}

impl CopyrightRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a copyright and attach it to its owning series
    pub async fn create(&self, data: CopyrightCreate) -> RepoResult<Copyright> {
        let series_id = data.series.clone();
        let copyright = Copyright {
            id: None,
            series: data.series,
            name: data.name,
            total_shares: data.total_shares,
            sold_shares: 0,
            price: data.price,
            merchandise_status: data
                .merchandise_status
                .unwrap_or(MerchandiseStatus::Undeveloped),
        };

        let created: Option<Copyright> = self.base.db().create(TABLE).content(copyright).await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create copyright".to_string()))?;

        if let Some(id) = &created.id {
            self.base
                .db()
                .query("UPDATE $series SET copyright_ids += $copyright")
                .bind(("series", series_id))
                .bind(("copyright", id.clone()))
                .await?
                .check()?;
        }

        Ok(created)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Copyright>> {
        let copyright: Option<Copyright> = self.base.db().select(id.clone()).await?;
        Ok(copyright)
    }

    /// Copyrights with unsold capacity remaining
    pub async fn find_available(&self) -> RepoResult<Vec<Copyright>> {
        let copyrights: Vec<Copyright> = self
            .base
            .db()
            .query("SELECT * FROM copyright WHERE sold_shares < total_shares")
            .await?
            .take(0)?;
        Ok(copyrights)
    }

    /// Reserve `count` units of capacity. The guard makes the increment a
    /// compare-and-set: a concurrent reservation that would overshoot
    /// `total_shares` comes back empty and the caller falls back or errors.
    pub async fn try_reserve_shares(&self, id: &RecordId, count: i64) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $copyright SET sold_shares += $count WHERE sold_shares + $count <= total_shares RETURN AFTER")
            .bind(("copyright", id.clone()))
            .bind(("count", count))
            .await?;
        let updated: Vec<Copyright> = result.take(0)?;
        Ok(!updated.is_empty())
    }

    /// Unconditional issuance-counter bump (fragment synthesis: the
    /// fragments were already earned against this copyright, so synthesis
    /// is not capacity-gated).
    pub async fn add_sold(&self, id: &RecordId, count: i64) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $copyright SET sold_shares += $count")
            .bind(("copyright", id.clone()))
            .bind(("count", count))
            .await?
            .check()?;
        Ok(())
    }
}
