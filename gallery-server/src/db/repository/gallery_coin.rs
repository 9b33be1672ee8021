//! Gallery Coin Ledger Repository
//!
//! The ledger is keyed deterministically by user, debits are conditional
//! updates (no partial debit), and every balance change refreshes the
//! `gallery_coins` mirror on the user document. Claim settlement runs the
//! ledger write and the mirror in one transaction.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::GalleryCoin;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "gallery_coin";

#[derive(Clone)]
pub struct GalleryCoinRepository {
    base: BaseRepository,
}

impl GalleryCoinRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn ledger_id(user: &RecordId) -> RecordId {
        RecordId::from_table_key(TABLE, user.key().to_string())
    }

    pub async fn find(&self, user: &RecordId) -> RepoResult<Option<GalleryCoin>> {
        let ledger: Option<GalleryCoin> = self.base.db().select(Self::ledger_id(user)).await?;
        Ok(ledger)
    }

    /// Fetch the ledger, creating an empty one on first touch
    pub async fn find_or_create(&self, user: &RecordId) -> RepoResult<GalleryCoin> {
        let mut result = self
            .base
            .db()
            .query("UPSERT $ledger SET user = $user, coins = coins ?? 0 RETURN AFTER")
            .bind(("ledger", Self::ledger_id(user)))
            .bind(("user", user.clone()))
            .await?;
        let ledgers: Vec<GalleryCoin> = result.take(0)?;
        ledgers
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to open gallery coin ledger".to_string()))
    }

    /// Credit the ledger and refresh the user mirror; returns the new balance
    pub async fn credit(&self, user: &RecordId, amount: i64) -> RepoResult<i64> {
        self.find_or_create(user).await?;
        self.base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 LET $after = (UPDATE $ledger SET coins += $amount RETURN AFTER); \
                 UPDATE $user SET gallery_coins = $after[0].coins; \
                 COMMIT TRANSACTION;",
            )
            .bind(("ledger", Self::ledger_id(user)))
            .bind(("user", user.clone()))
            .bind(("amount", amount))
            .await?
            .check()?;

        let ledger = self.find_or_create(user).await?;
        Ok(ledger.coins)
    }

    /// Conditional debit: `None` when the balance is below `amount`, so a
    /// failed debit leaves no partial state behind.
    pub async fn try_debit(&self, user: &RecordId, amount: i64) -> RepoResult<Option<i64>> {
        self.find_or_create(user).await?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $ledger SET coins -= $amount WHERE coins >= $amount RETURN AFTER")
            .bind(("ledger", Self::ledger_id(user)))
            .bind(("amount", amount))
            .await?;
        let updated: Vec<GalleryCoin> = result.take(0)?;

        match updated.into_iter().next() {
            Some(ledger) => {
                self.base
                    .db()
                    .query("UPDATE $user SET gallery_coins = $balance")
                    .bind(("user", user.clone()))
                    .bind(("balance", ledger.coins))
                    .await?
                    .check()?;
                Ok(Some(ledger.coins))
            }
            None => Ok(None),
        }
    }

    /// Settle a claim: credit earned coins, advance the settlement instant,
    /// clear offline tracking and refresh the mirror — one transaction, as
    /// the mirror must never diverge from a settled ledger.
    pub async fn settle_claim(
        &self,
        user: &RecordId,
        earned: i64,
        now: i64,
    ) -> RepoResult<i64> {
        self.base
            .db()
            .query(
                "BEGIN TRANSACTION; \
                 LET $after = (UPDATE $ledger SET coins += $earned, last_claim_time = $now, last_offline_time = NONE RETURN AFTER); \
                 UPDATE $user SET gallery_coins = $after[0].coins; \
                 COMMIT TRANSACTION;",
            )
            .bind(("ledger", Self::ledger_id(user)))
            .bind(("user", user.clone()))
            .bind(("earned", earned))
            .bind(("now", now))
            .await?
            .check()?;

        let ledger = self.find_or_create(user).await?;
        Ok(ledger.coins)
    }

    /// Stamp the instant offline accrual tracking begins
    pub async fn mark_offline(&self, user: &RecordId, at: i64) -> RepoResult<()> {
        self.base
            .db()
            .query("UPSERT $ledger SET user = $user, coins = coins ?? 0, last_offline_time = $at")
            .bind(("ledger", Self::ledger_id(user)))
            .bind(("user", user.clone()))
            .bind(("at", at))
            .await?
            .check()?;
        Ok(())
    }
}
