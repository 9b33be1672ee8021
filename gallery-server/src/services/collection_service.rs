//! Collection Service
//!
//! Share issuance and movement outside the box engine: direct purchase,
//! fragment synthesis and gifting, plus the ownership aggregations the
//! boundary exposes (counts, popularity ranking). Every path that moves a
//! share re-syncs the affected series buffs.

use crate::common::{AppError, AppResult};
use crate::db::repository::{
    CopyrightRepository, FragmentRepository, PopularCopyright, ShareRepository, UserRepository,
};
use crate::services::{SeriesBuffService, parse_id};
use shared::types::{ShareGrant, SynthesisResult};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Fragments required to synthesize one share
const FRAGMENTS_PER_SHARE: i64 = 10;
/// A share can change hands at most this many times
const MAX_GIFT_COUNT: i32 = 3;

#[derive(Clone)]
pub struct CollectionService {
    users: UserRepository,
    copyrights: CopyrightRepository,
    shares: ShareRepository,
    fragments: FragmentRepository,
    buffs: SeriesBuffService,
}

impl CollectionService {
    pub fn new(db: Surreal<Db>, buffs: SeriesBuffService) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            copyrights: CopyrightRepository::new(db.clone()),
            shares: ShareRepository::new(db.clone()),
            fragments: FragmentRepository::new(db),
            buffs,
        }
    }

    async fn require_user(&self, user_id: &str) -> AppResult<RecordId> {
        let user = parse_id("user", user_id)?;
        self.users
            .find_by_id(&user)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
        Ok(user)
    }

    async fn issue_many(
        &self,
        user: &RecordId,
        copyright: &RecordId,
        count: i64,
    ) -> AppResult<Vec<ShareGrant>> {
        let mut grants = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let share = self.shares.issue(user, copyright).await?;
            grants.push(ShareGrant {
                share_id: share.id.map(|id| id.to_string()).unwrap_or_default(),
                copyright_id: copyright.to_string(),
                chain_hash: share.chain_hash,
            });
        }
        Ok(grants)
    }

    // =========================================================================
    // Purchase
    // =========================================================================

    /// Buy `count` shares of a copyright. Capacity is reserved with a
    /// conditional increment, so concurrent purchases cannot oversell.
    /// Collecting the payment itself happens on an external rail before
    /// this is called.
    pub async fn purchase_shares(
        &self,
        user_id: &str,
        copyright_id: &str,
        count: i64,
    ) -> AppResult<Vec<ShareGrant>> {
        if count < 1 {
            return Err(AppError::InvalidInput(format!(
                "Share count must be a positive integer, got {count}"
            )));
        }
        let user = self.require_user(user_id).await?;
        let copyright_rid = parse_id("copyright", copyright_id)?;
        let copyright = self
            .copyrights
            .find_by_id(&copyright_rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Copyright {copyright_id} not found")))?;

        if !self.copyrights.try_reserve_shares(&copyright_rid, count).await? {
            return Err(AppError::Insufficient(format!(
                "Copyright {copyright_id} has fewer than {count} shares available"
            )));
        }

        let grants = self.issue_many(&user, &copyright_rid, count).await?;
        self.buffs.refresh_for(&user, &copyright.series).await?;

        tracing::info!(user = %user, copyright = %copyright_rid, count, "Shares purchased");
        Ok(grants)
    }

    // =========================================================================
    // Synthesis
    // =========================================================================

    /// Turn every full batch of 10 fragments into a share; the remainder
    /// (amount mod 10) stays on the fragment balance.
    pub async fn synthesize_shares(
        &self,
        user_id: &str,
        copyright_id: &str,
    ) -> AppResult<SynthesisResult> {
        let user = self.require_user(user_id).await?;
        let copyright_rid = parse_id("copyright", copyright_id)?;
        let copyright = self
            .copyrights
            .find_by_id(&copyright_rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Copyright {copyright_id} not found")))?;

        let fragment = self
            .fragments
            .find(&user, &copyright_rid)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No fragments of {copyright_id} for this user"))
            })?;
        if fragment.amount < FRAGMENTS_PER_SHARE {
            return Err(AppError::Insufficient(format!(
                "Synthesis needs {FRAGMENTS_PER_SHARE} fragments, only {} held",
                fragment.amount
            )));
        }

        let to_create = fragment.amount / FRAGMENTS_PER_SHARE;
        let remainder = fragment.amount % FRAGMENTS_PER_SHARE;

        self.fragments
            .set_amount(&user, &copyright_rid, remainder)
            .await?;
        // Synthesis issues real shares, so the issuance counter moves too
        self.copyrights.add_sold(&copyright_rid, to_create).await?;
        let grants = self.issue_many(&user, &copyright_rid, to_create).await?;
        self.buffs.refresh_for(&user, &copyright.series).await?;

        tracing::info!(
            user = %user,
            copyright = %copyright_rid,
            created = to_create,
            remainder,
            "Fragments synthesized"
        );
        Ok(SynthesisResult {
            shares_created: grants,
            fragments_remaining: remainder,
        })
    }

    // =========================================================================
    // Gifting
    // =========================================================================

    /// Re-home one share. Capped at 3 transfers per share and refused for
    /// shares locked in the lottery pool; both users' buffs for the owning
    /// series are re-synced afterwards.
    pub async fn gift_share(
        &self,
        from_user_id: &str,
        to_user_id: &str,
        share_id: &str,
    ) -> AppResult<()> {
        if from_user_id == to_user_id {
            return Err(AppError::InvalidInput(
                "Cannot gift a share to yourself".to_string(),
            ));
        }
        let from = self.require_user(from_user_id).await?;
        let to = self.require_user(to_user_id).await?;
        let share_rid = parse_id("share", share_id)?;

        let share = self
            .shares
            .find_by_id(&share_rid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Share {share_id} not found")))?;
        if share.user != from {
            return Err(AppError::InvalidInput(format!(
                "Share {share_id} does not belong to {from_user_id}"
            )));
        }
        if share.gift_count >= MAX_GIFT_COUNT {
            return Err(AppError::QuotaExceeded(format!(
                "Share {share_id} reached its gift limit of {MAX_GIFT_COUNT}"
            )));
        }
        if share.in_lottery_pool {
            return Err(AppError::InvalidInput(format!(
                "Share {share_id} is locked in the lottery pool"
            )));
        }

        if !self
            .shares
            .try_transfer(&share_rid, &from, &to, MAX_GIFT_COUNT)
            .await?
        {
            return Err(AppError::InvalidInput(format!(
                "Share {share_id} can no longer be gifted"
            )));
        }

        if let Some(copyright) = self.copyrights.find_by_id(&share.copyright).await? {
            self.buffs.refresh_for(&from, &copyright.series).await?;
            self.buffs.refresh_for(&to, &copyright.series).await?;
        }

        tracing::info!(from = %from, to = %to, share = %share_rid, "Share gifted");
        Ok(())
    }

    // =========================================================================
    // Aggregations
    // =========================================================================

    /// Shares a user holds of one copyright (derived count)
    pub async fn share_count(&self, user_id: &str, copyright_id: &str) -> AppResult<i64> {
        let user = parse_id("user", user_id)?;
        let copyright = parse_id("copyright", copyright_id)?;
        Ok(self.shares.count_for(&user, &copyright).await?)
    }

    /// Fragment balance for one (user, copyright) pair
    pub async fn fragment_count(&self, user_id: &str, copyright_id: &str) -> AppResult<i64> {
        let user = parse_id("user", user_id)?;
        let copyright = parse_id("copyright", copyright_id)?;
        Ok(self
            .fragments
            .find(&user, &copyright)
            .await?
            .map(|f| f.amount)
            .unwrap_or(0))
    }

    /// Copyrights ranked by issued-share count
    pub async fn popular_copyrights(&self, limit: usize) -> AppResult<Vec<(String, i64)>> {
        let rows: Vec<PopularCopyright> = self.shares.popular_copyrights(limit).await?;
        Ok(rows
            .into_iter()
            .map(|r| (r.copyright.to_string(), r.share_count))
            .collect())
    }
}
