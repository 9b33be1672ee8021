//! Share Repository
//!
//! One document per unit share; every ownership count here is derived by
//! aggregation, never read from a stored counter.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Share;
use serde::Deserialize;
use shared::util::{now_millis, simulated_chain_hash};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "share";

/// Per-user share count for one copyright (dividend settlement)
#[derive(Debug, Clone, Deserialize)]
pub struct HolderCount {
    pub user: RecordId,
    pub share_count: i64,
}

/// Ranking row: copyright by issued-share count
#[derive(Debug, Clone, Deserialize)]
pub struct PopularCopyright {
    pub copyright: RecordId,
    pub share_count: i64,
}

#[derive(Clone)]
pub struct ShareRepository {
    base: BaseRepository,
}

impl ShareRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Issue one share to `user`, stamping a fresh simulated chain hash
    pub async fn issue(&self, user: &RecordId, copyright: &RecordId) -> RepoResult<Share> {
        let share = Share {
            id: None,
            user: user.clone(),
            copyright: copyright.clone(),
            chain_hash: simulated_chain_hash(&user.to_string(), &copyright.to_string()),
            in_lottery_pool: false,
            gift_count: 0,
            created_at: now_millis(),
        };

        let created: Option<Share> = self.base.db().create(TABLE).content(share).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create share".to_string()))
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Share>> {
        let share: Option<Share> = self.base.db().select(id.clone()).await?;
        Ok(share)
    }

    /// Number of shares `user` holds of `copyright`
    pub async fn count_for(&self, user: &RecordId, copyright: &RecordId) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM share WHERE user = $user AND copyright = $copyright GROUP ALL")
            .bind(("user", user.clone()))
            .bind(("copyright", copyright.clone()))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    /// Distinct copyrights the user owns at least one share of
    pub async fn distinct_copyrights(&self, user: &RecordId) -> RepoResult<Vec<RecordId>> {
        #[derive(Deserialize)]
        struct Row {
            copyright: RecordId,
        }

        let mut result = self
            .base
            .db()
            .query("SELECT copyright FROM share WHERE user = $user GROUP BY copyright")
            .bind(("user", user.clone()))
            .await?;
        let rows: Vec<Row> = result.take(0)?;
        Ok(rows.into_iter().map(|r| r.copyright).collect())
    }

    /// Subset of `copyright_ids` the user owns at least one share of
    pub async fn owned_in(
        &self,
        user: &RecordId,
        copyright_ids: &[RecordId],
    ) -> RepoResult<Vec<RecordId>> {
        #[derive(Deserialize)]
        struct Row {
            copyright: RecordId,
        }

        let mut result = self
            .base
            .db()
            .query("SELECT copyright FROM share WHERE user = $user AND copyright IN $ids GROUP BY copyright")
            .bind(("user", user.clone()))
            .bind(("ids", copyright_ids.to_vec()))
            .await?;
        let rows: Vec<Row> = result.take(0)?;
        Ok(rows.into_iter().map(|r| r.copyright).collect())
    }

    /// Share counts of one copyright grouped by holder
    pub async fn group_by_user(&self, copyright: &RecordId) -> RepoResult<Vec<HolderCount>> {
        let mut result = self
            .base
            .db()
            .query("SELECT user, count() AS share_count FROM share WHERE copyright = $copyright GROUP BY user")
            .bind(("copyright", copyright.clone()))
            .await?;
        let holders: Vec<HolderCount> = result.take(0)?;
        Ok(holders)
    }

    /// Copyrights ranked by issued-share count
    pub async fn popular_copyrights(&self, limit: usize) -> RepoResult<Vec<PopularCopyright>> {
        let query = format!(
            "SELECT copyright, count() AS share_count FROM share GROUP BY copyright ORDER BY share_count DESC LIMIT {limit}"
        );
        let rows: Vec<PopularCopyright> = self.base.db().query(&query).await?.take(0)?;
        Ok(rows)
    }

    /// Re-home a share for gifting. The guard re-checks ownership, the
    /// transfer cap and the lottery-pool lock so a concurrent mutation
    /// cannot slip a share past its limits.
    pub async fn try_transfer(
        &self,
        share_id: &RecordId,
        from: &RecordId,
        to: &RecordId,
        max_gift_count: i32,
    ) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $share SET user = $to, gift_count += 1 \
                 WHERE user = $from AND gift_count < $max AND in_lottery_pool = false \
                 RETURN AFTER",
            )
            .bind(("share", share_id.clone()))
            .bind(("from", from.clone()))
            .bind(("to", to.clone()))
            .bind(("max", max_gift_count))
            .await?;
        let updated: Vec<Share> = result.take(0)?;
        Ok(!updated.is_empty())
    }
}
