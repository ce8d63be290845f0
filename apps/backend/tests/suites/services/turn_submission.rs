//! InboxService writes: taking turns, rejections, and racing submissions.

use backend::db::require_db;
use backend::db::txn::with_txn;
use backend::domain::turn::{Turn, TurnContent};
use backend::error::AppError;
use backend::errors::domain::{DomainError, ValidationKind};
use backend::repos::turns::TURN_EXPIRATION;
use backend::repos::{games, turns};
use backend::services::inbox::InboxService;
use sea_orm::{DatabaseConnection, TransactionTrait};
use time::OffsetDateTime;

use crate::support::build_test_state;
use crate::support::factory::{sample_drawing, seed_cat_game, unique_account_id};

async fn snapshot<C: sea_orm::ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<(Vec<Turn>, OffsetDateTime), DomainError> {
    let turns = turns::find_by_game(conn, game_id).await?;
    let game = games::require_game(conn, game_id).await?;
    Ok((turns, game.next_expiration))
}

#[tokio::test]
async fn test_submit_drawing_completes_turn_and_extends_deadline() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (author, drawer, next) = (unique_account_id(), unique_account_id(), unique_account_id());
            let (game_id, ids) = seed_cat_game(txn, author, drawer, next).await?;
            let drawing = sample_drawing(10);
            let service = InboxService::new();

            let before = OffsetDateTime::now_utc();
            service.submit_drawing(txn, drawer, game_id, &drawing).await?;
            let after = OffsetDateTime::now_utc();

            let (rows, expiration) = snapshot(txn, game_id).await?;
            assert_eq!(rows[1].id, ids[1]);
            assert!(rows[1].is_complete);
            assert_eq!(rows[1].content, Some(TurnContent::Drawing(drawing.clone())));
            assert!(!rows[2].is_complete);

            // Second-level slack for backends that store whole seconds.
            let lower = (before + TURN_EXPIRATION).unix_timestamp() - 1;
            let upper = (after + TURN_EXPIRATION).unix_timestamp() + 1;
            let got = expiration.unix_timestamp();
            assert!(lower <= got && got <= upper, "{lower} <= {got} <= {upper}");

            // The turn moves on: the drawer is done, the next player replies to the drawing.
            assert!(service.get_inbox_for_user(txn, drawer).await?.is_empty());
            let entry = service.get_inbox_entry_by_game(txn, next, game_id).await?;
            assert_eq!(entry.previous_turn, TurnContent::Drawing(drawing));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_label_follows_drawing() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (author, drawer, next) = (unique_account_id(), unique_account_id(), unique_account_id());
            let (game_id, _) = seed_cat_game(txn, author, drawer, next).await?;
            let service = InboxService::new();

            service
                .submit_drawing(txn, drawer, game_id, &sample_drawing(11))
                .await?;
            service
                .submit_label(txn, next, game_id, "a cat, probably")
                .await?;

            let (rows, _) = snapshot(txn, game_id).await?;
            assert!(rows.iter().all(|t| t.is_complete));
            assert_eq!(
                rows[2].content,
                Some(TurnContent::Label("a cat, probably".to_string()))
            );

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_wrong_turn_type_is_rejected_without_changes() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (author, drawer, next) = (unique_account_id(), unique_account_id(), unique_account_id());
            let (game_id, _) = seed_cat_game(txn, author, drawer, next).await?;
            let before = snapshot(txn, game_id).await?;

            // Turn 2 expects a drawing.
            let err = InboxService::new()
                .submit_label(txn, drawer, game_id, "x")
                .await
                .unwrap_err();
            assert!(err.is_turn_rejected(), "{err:?}");

            assert_eq!(snapshot(txn, game_id).await?, before);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_non_owner_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (author, drawer, next) = (unique_account_id(), unique_account_id(), unique_account_id());
            let (game_id, _) = seed_cat_game(txn, author, drawer, next).await?;
            let before = snapshot(txn, game_id).await?;
            let service = InboxService::new();

            for intruder in [author, next, unique_account_id()] {
                let err = service
                    .submit_drawing(txn, intruder, game_id, &sample_drawing(12))
                    .await
                    .unwrap_err();
                assert!(err.is_turn_rejected(), "user {intruder}: {err:?}");
            }

            assert_eq!(snapshot(txn, game_id).await?, before);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_completed_turn_cannot_be_taken_twice() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (author, drawer, next) = (unique_account_id(), unique_account_id(), unique_account_id());
            let (game_id, _) = seed_cat_game(txn, author, drawer, next).await?;
            let service = InboxService::new();
            let first = sample_drawing(13);

            service.submit_drawing(txn, drawer, game_id, &first).await?;
            let after_first = snapshot(txn, game_id).await?;

            let err = service
                .submit_drawing(txn, drawer, game_id, &sample_drawing(14))
                .await
                .unwrap_err();
            assert!(err.is_turn_rejected());

            let after_second = snapshot(txn, game_id).await?;
            assert_eq!(after_second, after_first);
            assert_eq!(after_second.0[1].content, Some(TurnContent::Drawing(first)));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_non_finite_drawing_is_refused_before_storage() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (author, drawer, next) = (unique_account_id(), unique_account_id(), unique_account_id());
            let (game_id, _) = seed_cat_game(txn, author, drawer, next).await?;
            let before = snapshot(txn, game_id).await?;
            let service = InboxService::new();

            let mut drawing = sample_drawing(16);
            drawing.lines[0].size = f64::NAN;
            drawing.lines[0].points[0].x = f64::INFINITY;

            let err = service
                .submit_drawing(txn, drawer, game_id, &drawing)
                .await
                .unwrap_err();
            assert!(
                matches!(err, DomainError::Validation(ValidationKind::InvalidTurn, _)),
                "{err:?}"
            );
            assert_eq!(snapshot(txn, game_id).await?, before);

            // The turn is still open and the next player's inbox is unaffected.
            assert!(service.get_inbox_for_user(txn, next).await?.is_empty());
            service
                .submit_drawing(txn, drawer, game_id, &sample_drawing(17))
                .await?;
            let entry = service.get_inbox_entry_by_game(txn, next, game_id).await?;
            assert_eq!(entry.previous_turn, TurnContent::Drawing(sample_drawing(17)));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_unknown_game_is_rejected() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let service = InboxService::new();
            let user = unique_account_id();

            let err = service
                .submit_drawing(txn, user, 999_999_999, &sample_drawing(15))
                .await
                .unwrap_err();
            assert!(err.is_turn_rejected());

            let err = service
                .submit_label(txn, user, 999_999_999, "ghost")
                .await
                .unwrap_err();
            assert!(err.is_turn_rejected());

            Ok::<_, AppError>(())
        })
    })
    .await
}

/// One submission in its own committed transaction.
async fn submit_and_commit(
    db: &DatabaseConnection,
    user_id: i64,
    game_id: i64,
    seed: u8,
) -> Result<(), AppError> {
    let txn = db.begin().await?;
    match InboxService::new()
        .submit_drawing(&txn, user_id, game_id, &sample_drawing(seed))
        .await
    {
        Ok(()) => {
            txn.commit().await?;
            Ok(())
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e.into())
        }
    }
}

/// Two submissions for the same turn, each in its own transaction.
///
/// The default SQLite memory pool has one connection, so the second `begin`
/// waits for the first commit and this exercises the late-writer path. Run
/// with `PIFUXELCK_TEST_DB_KIND=postgres` for truly concurrent transactions.
#[tokio::test]
async fn test_racing_submissions_have_one_winner() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");
    let db = require_db(&state)?;

    // Seed outside the rollback policy so both racers can see the game.
    let (author, drawer, next) = (unique_account_id(), unique_account_id(), unique_account_id());
    let seed_txn = db.begin().await?;
    let (game_id, _) = seed_cat_game(&seed_txn, author, drawer, next).await?;
    seed_txn.commit().await?;

    let before = OffsetDateTime::now_utc();
    let (a, b) = tokio::join!(
        submit_and_commit(db, drawer, game_id, 20),
        submit_and_commit(db, drawer, game_id, 21),
    );
    let after = OffsetDateTime::now_utc();

    let outcomes = [a, b];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "{outcomes:?}");

    let loser = outcomes
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("one submission should lose");
    assert_eq!(loser.code(), backend::errors::ErrorCode::TurnRejected);

    let (rows, expiration) = snapshot(db, game_id).await?;
    let winner_seed = if outcomes[0].is_ok() { 20 } else { 21 };
    assert_eq!(
        rows[1].content,
        Some(TurnContent::Drawing(sample_drawing(winner_seed)))
    );
    assert!(!rows[2].is_complete);
    let lower = (before + TURN_EXPIRATION).unix_timestamp() - 1;
    let upper = (after + TURN_EXPIRATION).unix_timestamp() + 1;
    let got = expiration.unix_timestamp();
    assert!(lower <= got && got <= upper, "{lower} <= {got} <= {upper}");

    Ok(())
}
