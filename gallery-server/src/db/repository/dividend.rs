//! Dividend Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Dividend;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "dividend";

#[derive(Clone)]
pub struct DividendRepository {
    base: BaseRepository,
}

impl DividendRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, dividend: Dividend) -> RepoResult<Dividend> {
        let created: Option<Dividend> = self.base.db().create(TABLE).content(dividend).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dividend".to_string()))
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Dividend>> {
        let dividend: Option<Dividend> = self.base.db().select(id.clone()).await?;
        Ok(dividend)
    }

    pub async fn find_pending(&self) -> RepoResult<Vec<Dividend>> {
        let dividends: Vec<Dividend> = self
            .base
            .db()
            .query("SELECT * FROM dividend WHERE status = 'pending'")
            .await?
            .take(0)?;
        Ok(dividends)
    }

    /// Flip `pending -> paid`; false when the record was already paid
    /// (or is gone), so double-payment cannot happen.
    pub async fn try_mark_paid(&self, id: &RecordId, at: i64) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $dividend SET status = 'paid', paid_at = $at \
                 WHERE status = 'pending' RETURN AFTER",
            )
            .bind(("dividend", id.clone()))
            .bind(("at", at))
            .await?;
        let updated: Vec<Dividend> = result.take(0)?;
        Ok(!updated.is_empty())
    }
}
