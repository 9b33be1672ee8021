//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate};
use shared::util::now_millis;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a user on first login
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        if self.find_by_open_id(&data.open_id).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "User '{}' already exists",
                data.open_id
            )));
        }

        let user = User {
            id: None,
            open_id: data.open_id,
            name: data.name,
            avatar: data.avatar.unwrap_or_default(),
            coins: 0,
            gallery_coins: 0,
            level: 1,
            experience: 0,
            popularity: 0,
            last_online_time: None,
            is_minor: data.is_minor.unwrap_or(false),
            created_at: now_millis(),
        };

        let created: Option<User> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select(id.clone()).await?;
        Ok(user)
    }

    pub async fn find_by_open_id(&self, open_id: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE open_id = $open_id LIMIT 1")
            .bind(("open_id", open_id.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn add_popularity(&self, id: &RecordId, delta: i64) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $user SET popularity += $delta")
            .bind(("user", id.clone()))
            .bind(("delta", delta))
            .await?
            .check()?;
        Ok(())
    }

    /// Conditional popularity debit; false when the balance is below `amount`
    pub async fn try_debit_popularity(&self, id: &RecordId, amount: i64) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query("UPDATE $user SET popularity -= $amount WHERE popularity >= $amount RETURN AFTER")
            .bind(("user", id.clone()))
            .bind(("amount", amount))
            .await?;
        let updated: Vec<User> = result.take(0)?;
        Ok(!updated.is_empty())
    }

    pub async fn set_last_online(&self, id: &RecordId, at: i64) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $user SET last_online_time = $at")
            .bind(("user", id.clone()))
            .bind(("at", at))
            .await?
            .check()?;
        Ok(())
    }
}
