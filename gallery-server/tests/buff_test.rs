//! Buff engine: completion detection, activation idempotence, aggregation

mod common;

use common::*;
use gallery_server::db::repository::UserBuffRepository;
use shared::types::BuffType;

#[tokio::test]
async fn incomplete_series_activates_nothing() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "starter").await;
    let series = create_series(&state, "Pair", 0, BuffType::Revenue).await;
    let a = create_copyright(&state, &series, "art-a", 300).await;
    let b = create_copyright(&state, &series, "art-b", 300).await;

    grant_shares(&state, &user, &a, 1).await;
    let activated = state
        .series_buffs
        .check_and_activate(&user.to_string(), &series.to_string())
        .await
        .unwrap();
    assert!(!activated);

    // A failed check writes no buff document at all
    let buff = UserBuffRepository::new(state.db.clone())
        .find(&user, &series)
        .await
        .unwrap();
    assert!(buff.is_none());

    grant_shares(&state, &user, &b, 1).await;
    let activated = state
        .series_buffs
        .check_and_activate(&user.to_string(), &series.to_string())
        .await
        .unwrap();
    assert!(activated);

    let buff = UserBuffRepository::new(state.db.clone())
        .find(&user, &series)
        .await
        .unwrap()
        .expect("buff created on completion");
    assert!(buff.is_active);
    assert_eq!(buff.buff_type, BuffType::Revenue);
}

#[tokio::test]
async fn activation_is_idempotent_once_active() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "repeat").await;
    let series = create_series(&state, "Solo Pair", 0, BuffType::Game).await;
    for name in ["art-a", "art-b"] {
        let c = create_copyright(&state, &series, name, 300).await;
        grant_shares(&state, &user, &c, 1).await;
    }

    assert!(
        state
            .series_buffs
            .check_and_activate(&user.to_string(), &series.to_string())
            .await
            .unwrap()
    );

    // Pin a sentinel activation instant, then re-check: no re-stamp
    let buffs = UserBuffRepository::new(state.db.clone());
    let buff = buffs.find(&user, &series).await.unwrap().unwrap();
    state
        .db
        .query("UPDATE $buff SET activated_at = 12345")
        .bind(("buff", buff.id.clone().unwrap()))
        .await
        .unwrap()
        .check()
        .unwrap();

    assert!(
        state
            .series_buffs
            .check_and_activate(&user.to_string(), &series.to_string())
            .await
            .unwrap()
    );
    let buff = buffs.find(&user, &series).await.unwrap().unwrap();
    assert_eq!(buff.activated_at, 12345);
}

#[tokio::test]
async fn effects_aggregate_active_buffs_by_type() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "aggregator").await;

    for (name, buff_type) in [("Revenue Set", BuffType::Revenue), ("Game Set", BuffType::Game)] {
        let series = create_series(&state, name, 0, buff_type).await;
        for i in 0..2 {
            let c = create_copyright(&state, &series, &format!("{name}-{i}"), 300).await;
            grant_shares(&state, &user, &c, 1).await;
        }
        assert!(
            state
                .series_buffs
                .check_and_activate(&user.to_string(), &series.to_string())
                .await
                .unwrap()
        );
    }

    let effects = state
        .series_buffs
        .get_user_buff_effects(&user.to_string())
        .await
        .unwrap();
    assert_eq!(effects.revenue_buff_count, 1);
    assert_eq!(effects.game_buff_count, 1);
    assert_eq!(effects.revenue_discount, 0.05);
    assert_eq!(effects.game_speed_multiplier, 1.1);
}

#[tokio::test]
async fn completion_progress_counts_owned_members() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "tracker").await;
    let series = create_series(&state, "Trio", 0, BuffType::Game).await;
    let a = create_copyright(&state, &series, "art-a", 300).await;
    let _b = create_copyright(&state, &series, "art-b", 300).await;
    let c = create_copyright(&state, &series, "art-c", 300).await;

    grant_shares(&state, &user, &a, 1).await;
    grant_shares(&state, &user, &c, 2).await;

    let (owned, total) = state
        .series_buffs
        .completion_progress(&user.to_string(), &series.to_string())
        .await
        .unwrap();
    assert_eq!((owned, total), (2, 3));

    assert!(
        !state
            .series_buffs
            .is_series_complete(&user.to_string(), &series.to_string())
            .await
            .unwrap()
    );
}
