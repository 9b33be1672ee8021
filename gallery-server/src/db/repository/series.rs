//! Series Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Series, SeriesCreate};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "series";

#[derive(Clone)]
pub struct SeriesRepository {
    base: BaseRepository,
}

impl SeriesRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a series with an empty member list; copyrights attach on
    /// their own creation so `copyright_ids` only ever holds live records.
    pub async fn create(&self, data: SeriesCreate) -> RepoResult<Series> {
        let series = Series {
            id: None,
            name: data.name,
            description: data.description,
            copyright_ids: Vec::new(),
            hourly_bonus_coins: data.hourly_bonus_coins,
            buff_type: data.buff_type,
            buff_effect: data.buff_effect,
        };

        let created: Option<Series> = self.base.db().create(TABLE).content(series).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create series".to_string()))
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Series>> {
        let series: Option<Series> = self.base.db().select(id.clone()).await?;
        Ok(series)
    }

}
