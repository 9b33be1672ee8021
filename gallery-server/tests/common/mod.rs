//! Shared fixtures for the engine integration tests: an embedded database
//! in a fresh tempdir plus catalog/user seeding through the repositories.
#![allow(dead_code)]

use gallery_server::db::models::{CopyrightCreate, SeriesCreate, UserCreate};
use gallery_server::db::repository::{
    CopyrightRepository, GalleryCoinRepository, SeriesRepository, ShareRepository, UserRepository,
};
use gallery_server::server::{AppState, Config};
use shared::types::BuffType;
use shared::util::now_millis;
use surrealdb::RecordId;
use tempfile::TempDir;

/// Stand up a full AppState over a throwaway database. Keep the TempDir
/// alive for the duration of the test.
pub async fn test_state() -> (AppState, TempDir) {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    let config = Config::with_work_dir(tmp.path().to_string_lossy().to_string());
    let state = AppState::initialize(config)
        .await
        .expect("failed to initialize state");
    (state, tmp)
}

pub async fn create_user(state: &AppState, open_id: &str) -> RecordId {
    let user = UserRepository::new(state.db.clone())
        .create(UserCreate {
            open_id: open_id.to_string(),
            name: open_id.to_string(),
            avatar: None,
            is_minor: None,
        })
        .await
        .expect("failed to create user");
    user.id.expect("user id")
}

pub async fn create_minor(state: &AppState, open_id: &str) -> RecordId {
    let user = UserRepository::new(state.db.clone())
        .create(UserCreate {
            open_id: open_id.to_string(),
            name: open_id.to_string(),
            avatar: None,
            is_minor: Some(true),
        })
        .await
        .expect("failed to create user");
    user.id.expect("user id")
}

pub async fn create_series(
    state: &AppState,
    name: &str,
    hourly_bonus_coins: i64,
    buff_type: BuffType,
) -> RecordId {
    let series = SeriesRepository::new(state.db.clone())
        .create(SeriesCreate {
            name: name.to_string(),
            description: None,
            hourly_bonus_coins,
            buff_type,
            buff_effect: None,
        })
        .await
        .expect("failed to create series");
    series.id.expect("series id")
}

pub async fn create_copyright(
    state: &AppState,
    series: &RecordId,
    name: &str,
    total_shares: i64,
) -> RecordId {
    let copyright = CopyrightRepository::new(state.db.clone())
        .create(CopyrightCreate {
            series: series.clone(),
            name: name.to_string(),
            total_shares,
            price: 500,
            merchandise_status: None,
        })
        .await
        .expect("failed to create copyright");
    copyright.id.expect("copyright id")
}

/// Grant `count` shares directly through the share repository (seeding only;
/// does not touch the issuance counter)
pub async fn grant_shares(state: &AppState, user: &RecordId, copyright: &RecordId, count: usize) {
    let shares = ShareRepository::new(state.db.clone());
    for _ in 0..count {
        shares.issue(user, copyright).await.expect("failed to issue share");
    }
}

/// Fund the user's gallery-coin ledger
pub async fn fund_coins(state: &AppState, user: &RecordId, amount: i64) {
    GalleryCoinRepository::new(state.db.clone())
        .credit(user, amount)
        .await
        .expect("failed to credit coins");
}

fn ledger_id(user: &RecordId) -> RecordId {
    RecordId::from_table_key("gallery_coin", user.key().to_string())
}

/// Move the ledger's last settlement instant `hours` into the past
pub async fn backdate_last_claim(state: &AppState, user: &RecordId, hours: i64) {
    GalleryCoinRepository::new(state.db.clone())
        .find_or_create(user)
        .await
        .expect("failed to open ledger");
    state
        .db
        .query("UPDATE $ledger SET last_claim_time = $at")
        .bind(("ledger", ledger_id(user)))
        .bind(("at", now_millis() - hours * 3_600_000))
        .await
        .expect("failed to backdate claim")
        .check()
        .expect("failed to backdate claim");
}

/// Stamp the offline-tracking instant `hours` into the past
pub async fn backdate_offline(state: &AppState, user: &RecordId, hours: i64) {
    GalleryCoinRepository::new(state.db.clone())
        .find_or_create(user)
        .await
        .expect("failed to open ledger");
    state
        .db
        .query("UPDATE $ledger SET last_offline_time = $at")
        .bind(("ledger", ledger_id(user)))
        .bind(("at", now_millis() - hours * 3_600_000))
        .await
        .expect("failed to backdate offline")
        .check()
        .expect("failed to backdate offline");
}
