//! Accrual engine: rate steps, claim settlement, offline reconciliation

mod common;

use common::*;
use gallery_server::db::repository::{GalleryCoinRepository, UserRepository};
use shared::types::BuffType;

#[tokio::test]
async fn rate_is_zero_below_five_distinct_copyrights() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "collector").await;
    let series = create_series(&state, "Landscapes", 0, BuffType::Game).await;

    for i in 0..4 {
        let c = create_copyright(&state, &series, &format!("art-{i}"), 300).await;
        grant_shares(&state, &user, &c, 1).await;
    }

    let rate = state.gallery_coins.calculate_rate(&user.to_string()).await.unwrap();
    assert_eq!(rate, 0);
}

#[tokio::test]
async fn rate_counts_copyrights_not_shares() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "whale").await;
    let series = create_series(&state, "Portraits", 0, BuffType::Game).await;

    // 20 shares of one pattern still count as a single copyright
    let c = create_copyright(&state, &series, "art-solo", 300).await;
    grant_shares(&state, &user, &c, 20).await;
    let rate = state.gallery_coins.calculate_rate(&user.to_string()).await.unwrap();
    assert_eq!(rate, 0);

    // Five distinct copyrights unlock the first step
    for i in 0..4 {
        let c = create_copyright(&state, &series, &format!("art-{i}"), 300).await;
        grant_shares(&state, &user, &c, 1).await;
    }
    let rate = state.gallery_coins.calculate_rate(&user.to_string()).await.unwrap();
    assert_eq!(rate, 10_000);

    // Rate is a step function: 9 distinct is still one step
    for i in 4..8 {
        let c = create_copyright(&state, &series, &format!("art-{i}"), 300).await;
        grant_shares(&state, &user, &c, 1).await;
    }
    let rate = state.gallery_coins.calculate_rate(&user.to_string()).await.unwrap();
    assert_eq!(rate, 10_000);

    let c = create_copyright(&state, &series, "art-tenth", 300).await;
    grant_shares(&state, &user, &c, 1).await;
    let rate = state.gallery_coins.calculate_rate(&user.to_string()).await.unwrap();
    assert_eq!(rate, 20_000);
}

#[tokio::test]
async fn rate_adds_flat_bonus_of_active_series_buffs() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "finisher").await;
    let series = create_series(&state, "Bonus Set", 500, BuffType::Game).await;

    let mut copyrights = Vec::new();
    for i in 0..4 {
        let c = create_copyright(&state, &series, &format!("art-{i}"), 300).await;
        grant_shares(&state, &user, &c, 1).await;
        copyrights.push(c);
    }

    // Four distinct copyrights: no base rate yet, bonus only after activation
    assert_eq!(
        state.gallery_coins.calculate_rate(&user.to_string()).await.unwrap(),
        0
    );

    let activated = state
        .series_buffs
        .check_and_activate(&user.to_string(), &series.to_string())
        .await
        .unwrap();
    assert!(activated);

    assert_eq!(
        state.gallery_coins.calculate_rate(&user.to_string()).await.unwrap(),
        500
    );
}

#[tokio::test]
async fn claim_settles_elapsed_hours_and_mirrors_balance() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "patient").await;
    let series = create_series(&state, "Cities", 0, BuffType::Game).await;
    for i in 0..5 {
        let c = create_copyright(&state, &series, &format!("art-{i}"), 300).await;
        grant_shares(&state, &user, &c, 1).await;
    }

    backdate_last_claim(&state, &user, 3).await;
    let earned = state.gallery_coins.claim(&user.to_string()).await.unwrap();
    assert_eq!(earned, 30_000);

    let balance = state.gallery_coins.balance(&user.to_string()).await.unwrap();
    assert_eq!(balance, 30_000);

    // The denormalized mirror moved with the ledger
    let mirrored = UserRepository::new(state.db.clone())
        .find_by_id(&user)
        .await
        .unwrap()
        .unwrap()
        .gallery_coins;
    assert_eq!(mirrored, 30_000);
}

#[tokio::test]
async fn claim_twice_without_elapsed_time_is_a_no_op() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "eager").await;
    let series = create_series(&state, "Rivers", 0, BuffType::Game).await;
    for i in 0..5 {
        let c = create_copyright(&state, &series, &format!("art-{i}"), 300).await;
        grant_shares(&state, &user, &c, 1).await;
    }

    backdate_last_claim(&state, &user, 2).await;
    let first = state.gallery_coins.claim(&user.to_string()).await.unwrap();
    assert_eq!(first, 20_000);

    let second = state.gallery_coins.claim(&user.to_string()).await.unwrap();
    assert_eq!(second, 0);
    assert_eq!(
        state.gallery_coins.balance(&user.to_string()).await.unwrap(),
        20_000
    );
}

#[tokio::test]
async fn offline_hours_cap_at_twelve() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "sleeper").await;
    let series = create_series(&state, "Night", 0, BuffType::Game).await;
    for i in 0..5 {
        let c = create_copyright(&state, &series, &format!("art-{i}"), 300).await;
        grant_shares(&state, &user, &c, 1).await;
    }

    // Fresh settlement, then a 20-hour offline window: only 12 count
    backdate_last_claim(&state, &user, 0).await;
    backdate_offline(&state, &user, 20).await;

    let earned = state.gallery_coins.claim(&user.to_string()).await.unwrap();
    assert_eq!(earned, 12 * 10_000);

    // The offline stamp is consumed by the claim
    let ledger = GalleryCoinRepository::new(state.db.clone())
        .find(&user)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ledger.last_offline_time, None);
}

#[tokio::test]
async fn overlapping_online_and_offline_windows_both_count() {
    // Deployed behavior: the online and offline windows are summed even
    // when they cover the same wall-clock span.
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "overlap").await;
    let series = create_series(&state, "Dawn", 0, BuffType::Game).await;
    for i in 0..5 {
        let c = create_copyright(&state, &series, &format!("art-{i}"), 300).await;
        grant_shares(&state, &user, &c, 1).await;
    }

    backdate_last_claim(&state, &user, 3).await;
    backdate_offline(&state, &user, 2).await;

    let earned = state.gallery_coins.claim(&user.to_string()).await.unwrap();
    assert_eq!(earned, (3 + 2) * 10_000);
}

#[tokio::test]
async fn record_offline_time_stamps_ledger_and_user() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "leaver").await;

    state
        .gallery_coins
        .record_offline_time(&user.to_string())
        .await
        .unwrap();

    let ledger = GalleryCoinRepository::new(state.db.clone())
        .find(&user)
        .await
        .unwrap()
        .unwrap();
    assert!(ledger.last_offline_time.is_some());

    let stored = UserRepository::new(state.db.clone())
        .find_by_id(&user)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.last_online_time.is_some());
}
