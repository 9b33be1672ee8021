//! Box Record Repository
//!
//! Append-only: records are created once and never updated.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::BoxRecord;
use shared::types::BoxKind;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "box";

#[derive(Clone)]
pub struct BoxRecordRepository {
    base: BaseRepository,
}

impl BoxRecordRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn append(&self, record: BoxRecord) -> RepoResult<BoxRecord> {
        let created: Option<BoxRecord> = self.base.db().create(TABLE).content(record).await?;
        created.ok_or_else(|| RepoError::Database("Failed to append box record".to_string()))
    }

    /// Boxes of one kind opened by `user` inside [start, end]
    pub async fn count_in_window(
        &self,
        user: &RecordId,
        kind: BoxKind,
        start: i64,
        end: i64,
    ) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() FROM box WHERE user = $user AND box_type = $kind \
                 AND created_at >= $start AND created_at <= $end GROUP ALL",
            )
            .bind(("user", user.clone()))
            .bind(("kind", kind))
            .bind(("start", start))
            .bind(("end", end))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    /// Whether the one-shot series box was already claimed for this pair
    pub async fn has_series_box(&self, user: &RecordId, series: &RecordId) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() FROM box WHERE user = $user AND box_type = 'series' \
                 AND series = $series GROUP ALL",
            )
            .bind(("user", user.clone()))
            .bind(("series", series.clone()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0) > 0)
    }
}
