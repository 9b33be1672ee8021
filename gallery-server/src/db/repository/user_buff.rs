//! User Buff Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::UserBuff;
use shared::types::BuffType;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "user_buff";

#[derive(Clone)]
pub struct UserBuffRepository {
    base: BaseRepository,
}

impl UserBuffRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn buff_id(user: &RecordId, series: &RecordId) -> RecordId {
        RecordId::from_table_key(TABLE, format!("{}_{}", user.key(), series.key()))
    }

    pub async fn find(
        &self,
        user: &RecordId,
        series: &RecordId,
    ) -> RepoResult<Option<UserBuff>> {
        let buff: Option<UserBuff> = self.base.db().select(Self::buff_id(user, series)).await?;
        Ok(buff)
    }

    pub async fn find_active(&self, user: &RecordId) -> RepoResult<Vec<UserBuff>> {
        let buffs: Vec<UserBuff> = self
            .base
            .db()
            .query("SELECT * FROM user_buff WHERE user = $user AND is_active = true")
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(buffs)
    }

    /// Upsert the (user, series) buff to active
    pub async fn activate(
        &self,
        user: &RecordId,
        series: &RecordId,
        buff_type: BuffType,
        at: i64,
    ) -> RepoResult<UserBuff> {
        let mut result = self
            .base
            .db()
            .query(
                "UPSERT $buff SET user = $user, series = $series, buff_type = $buff_type, \
                 is_active = true, activated_at = $at RETURN AFTER",
            )
            .bind(("buff", Self::buff_id(user, series)))
            .bind(("user", user.clone()))
            .bind(("series", series.clone()))
            .bind(("buff_type", buff_type))
            .bind(("at", at))
            .await?;
        let buffs: Vec<UserBuff> = result.take(0)?;
        buffs
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to activate buff".to_string()))
    }

    /// Toggle the buff off; a missing record is a no-op
    pub async fn deactivate(&self, user: &RecordId, series: &RecordId) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $buff SET is_active = false")
            .bind(("buff", Self::buff_id(user, series)))
            .await?
            .check()?;
        Ok(())
    }
}
