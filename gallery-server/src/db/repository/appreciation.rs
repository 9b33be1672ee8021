//! Appreciation Repository
//!
//! Append-only log; daily quotas and duplicate checks are count queries
//! over the local-day window.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Appreciation;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "appreciation";

#[derive(Clone)]
pub struct AppreciationRepository {
    base: BaseRepository,
}

impl AppreciationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn append(&self, record: Appreciation) -> RepoResult<Appreciation> {
        let created: Option<Appreciation> = self.base.db().create(TABLE).content(record).await?;
        created.ok_or_else(|| RepoError::Database("Failed to append appreciation".to_string()))
    }

    pub async fn count_in_window(
        &self,
        user: &RecordId,
        start: i64,
        end: i64,
    ) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() FROM appreciation WHERE user = $user \
                 AND created_at >= $start AND created_at <= $end GROUP ALL",
            )
            .bind(("user", user.clone()))
            .bind(("start", start))
            .bind(("end", end))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    /// Whether this (user, target, copyright) triple already appreciated
    /// inside the window
    pub async fn exists_in_window(
        &self,
        user: &RecordId,
        target: &RecordId,
        copyright: &RecordId,
        start: i64,
        end: i64,
    ) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() FROM appreciation WHERE user = $user AND target_user = $target \
                 AND copyright = $copyright AND created_at >= $start AND created_at <= $end GROUP ALL",
            )
            .bind(("user", user.clone()))
            .bind(("target", target.clone()))
            .bind(("copyright", copyright.clone()))
            .bind(("start", start))
            .bind(("end", end))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0) > 0)
    }
}
