//! Fragment Repository
//!
//! Fragment balances live under a deterministic `user_copyright` record key,
//! so concurrent grants upsert the same document instead of multiplying it.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Fragment;
use shared::util::now_millis;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "fragment";

#[derive(Clone)]
pub struct FragmentRepository {
    base: BaseRepository,
}

impl FragmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn record_id(user: &RecordId, copyright: &RecordId) -> RecordId {
        RecordId::from_table_key(TABLE, format!("{}_{}", user.key(), copyright.key()))
    }

    pub async fn find(
        &self,
        user: &RecordId,
        copyright: &RecordId,
    ) -> RepoResult<Option<Fragment>> {
        let fragment: Option<Fragment> = self
            .base
            .db()
            .select(Self::record_id(user, copyright))
            .await?;
        Ok(fragment)
    }

    /// Add fragments, creating the balance document if absent
    pub async fn add(
        &self,
        user: &RecordId,
        copyright: &RecordId,
        delta: i64,
    ) -> RepoResult<Fragment> {
        let mut result = self
            .base
            .db()
            .query(
                "UPSERT $fragment SET user = $user, copyright = $copyright, \
                 amount = (amount ?? 0) + $delta, updated_at = $now RETURN AFTER",
            )
            .bind(("fragment", Self::record_id(user, copyright)))
            .bind(("user", user.clone()))
            .bind(("copyright", copyright.clone()))
            .bind(("delta", delta))
            .bind(("now", now_millis()))
            .await?;
        let fragments: Vec<Fragment> = result.take(0)?;
        fragments
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to upsert fragment balance".to_string()))
    }

    /// Overwrite the balance (synthesis remainder)
    pub async fn set_amount(
        &self,
        user: &RecordId,
        copyright: &RecordId,
        amount: i64,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $fragment SET amount = $amount, updated_at = $now")
            .bind(("fragment", Self::record_id(user, copyright)))
            .bind(("amount", amount))
            .bind(("now", now_millis()))
            .await?
            .check()?;
        Ok(())
    }
}
