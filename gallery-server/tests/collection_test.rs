//! Collection operations: purchase capacity, synthesis round-trip, gifting

mod common;

use common::*;
use gallery_server::common::AppError;
use gallery_server::db::repository::{
    CopyrightRepository, FragmentRepository, UserBuffRepository,
};
use shared::types::BuffType;

#[tokio::test]
async fn purchase_validates_count_and_capacity() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "buyer").await;
    let series = create_series(&state, "Limited", 0, BuffType::Revenue).await;
    let copyright = create_copyright(&state, &series, "art-rare", 3).await;

    let err = state
        .collections
        .purchase_shares(&user.to_string(), &copyright.to_string(), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)), "got {err:?}");

    let grants = state
        .collections
        .purchase_shares(&user.to_string(), &copyright.to_string(), 2)
        .await
        .unwrap();
    assert_eq!(grants.len(), 2);
    assert!(grants.iter().all(|g| g.chain_hash.len() == 64));

    // Only one unit left: a two-share purchase must not partially fill
    let err = state
        .collections
        .purchase_shares(&user.to_string(), &copyright.to_string(), 2)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Insufficient(_)), "got {err:?}");

    state
        .collections
        .purchase_shares(&user.to_string(), &copyright.to_string(), 1)
        .await
        .unwrap();

    let sold = CopyrightRepository::new(state.db.clone())
        .find_by_id(&copyright)
        .await
        .unwrap()
        .unwrap()
        .sold_shares;
    assert_eq!(sold, 3);
}

#[tokio::test]
async fn synthesis_converts_tens_and_keeps_the_remainder() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "crafter").await;
    let series = create_series(&state, "Forge", 0, BuffType::Game).await;
    let copyright = create_copyright(&state, &series, "art-a", 300).await;

    FragmentRepository::new(state.db.clone())
        .add(&user, &copyright, 23)
        .await
        .unwrap();

    let result = state
        .collections
        .synthesize_shares(&user.to_string(), &copyright.to_string())
        .await
        .unwrap();
    assert_eq!(result.shares_created.len(), 2);
    assert_eq!(result.fragments_remaining, 3);

    assert_eq!(
        state
            .collections
            .share_count(&user.to_string(), &copyright.to_string())
            .await
            .unwrap(),
        2
    );
    assert_eq!(
        state
            .collections
            .fragment_count(&user.to_string(), &copyright.to_string())
            .await
            .unwrap(),
        3
    );

    // Synthesis moves the issuance counter like any other issue path
    let sold = CopyrightRepository::new(state.db.clone())
        .find_by_id(&copyright)
        .await
        .unwrap()
        .unwrap()
        .sold_shares;
    assert_eq!(sold, 2);

    // The remainder is below a full batch now
    let err = state
        .collections
        .synthesize_shares(&user.to_string(), &copyright.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Insufficient(_)), "got {err:?}");
}

#[tokio::test]
async fn synthesis_without_fragments_is_not_found() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "empty").await;
    let series = create_series(&state, "Forge", 0, BuffType::Game).await;
    let copyright = create_copyright(&state, &series, "art-a", 300).await;

    let err = state
        .collections
        .synthesize_shares(&user.to_string(), &copyright.to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn gifting_moves_the_share_and_resyncs_both_buffs() {
    let (state, _tmp) = test_state().await;
    let giver = create_user(&state, "giver").await;
    let receiver = create_user(&state, "receiver").await;
    let series = create_series(&state, "Pair", 0, BuffType::Revenue).await;
    let a = create_copyright(&state, &series, "art-a", 300).await;
    let b = create_copyright(&state, &series, "art-b", 300).await;

    // Giver holds the full series, receiver holds only B
    let a_grants = state
        .collections
        .purchase_shares(&giver.to_string(), &a.to_string(), 1)
        .await
        .unwrap();
    state
        .collections
        .purchase_shares(&giver.to_string(), &b.to_string(), 1)
        .await
        .unwrap();
    state
        .collections
        .purchase_shares(&receiver.to_string(), &b.to_string(), 1)
        .await
        .unwrap();

    assert!(
        state
            .series_buffs
            .check_and_activate(&giver.to_string(), &series.to_string())
            .await
            .unwrap()
    );

    // Gifting the giver's only A share breaks their completion and
    // completes the receiver's
    state
        .collections
        .gift_share(&giver.to_string(), &receiver.to_string(), &a_grants[0].share_id)
        .await
        .unwrap();

    let buffs = UserBuffRepository::new(state.db.clone());
    let giver_buff = buffs.find(&giver, &series).await.unwrap().unwrap();
    assert!(!giver_buff.is_active);
    let receiver_buff = buffs.find(&receiver, &series).await.unwrap().unwrap();
    assert!(receiver_buff.is_active);

    assert_eq!(
        state
            .collections
            .share_count(&receiver.to_string(), &a.to_string())
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn gift_cap_and_lottery_lock_refuse_the_transfer() {
    let (state, _tmp) = test_state().await;
    let giver = create_user(&state, "giver").await;
    let receiver = create_user(&state, "receiver").await;
    let series = create_series(&state, "Locks", 0, BuffType::Game).await;
    let copyright = create_copyright(&state, &series, "art-a", 300).await;

    let grants = state
        .collections
        .purchase_shares(&giver.to_string(), &copyright.to_string(), 2)
        .await
        .unwrap();

    // A share that already changed hands three times stays put
    state
        .db
        .query("UPDATE $share SET gift_count = 3")
        .bind(("share", grants[0].share_id.parse::<surrealdb::RecordId>().unwrap()))
        .await
        .unwrap()
        .check()
        .unwrap();
    let err = state
        .collections
        .gift_share(&giver.to_string(), &receiver.to_string(), &grants[0].share_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::QuotaExceeded(_)), "got {err:?}");

    // A pooled share is locked
    state
        .db
        .query("UPDATE $share SET in_lottery_pool = true")
        .bind(("share", grants[1].share_id.parse::<surrealdb::RecordId>().unwrap()))
        .await
        .unwrap()
        .check()
        .unwrap();
    let err = state
        .collections
        .gift_share(&giver.to_string(), &receiver.to_string(), &grants[1].share_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)), "got {err:?}");
}

#[tokio::test]
async fn popular_ranking_orders_by_issued_shares() {
    let (state, _tmp) = test_state().await;
    let user = create_user(&state, "fan").await;
    let other = create_user(&state, "other-fan").await;
    let series = create_series(&state, "Charts", 0, BuffType::Game).await;
    let hot = create_copyright(&state, &series, "art-hot", 300).await;
    let cold = create_copyright(&state, &series, "art-cold", 300).await;

    grant_shares(&state, &user, &hot, 2).await;
    grant_shares(&state, &other, &hot, 1).await;
    grant_shares(&state, &user, &cold, 1).await;

    let ranking = state.collections.popular_copyrights(10).await.unwrap();
    assert_eq!(ranking.len(), 2);
    assert_eq!(ranking[0], (hot.to_string(), 3));
    assert_eq!(ranking[1], (cold.to_string(), 1));
}
