//! InboxService reads: which games wait on a player and what they reply to.

use backend::adapters::turns_sea::TurnCreate;
use backend::db::txn::with_txn;
use backend::domain::turn::TurnContent;
use backend::error::AppError;
use backend::services::inbox::InboxService;

use crate::support::build_test_state;
use crate::support::factory::{encoded, sample_drawing, seed_cat_game, seed_game, unique_account_id};

#[tokio::test]
async fn test_entry_shows_previous_label() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (author, drawer, next) = (unique_account_id(), unique_account_id(), unique_account_id());
            let (game_id, _) = seed_cat_game(txn, author, drawer, next).await?;

            let entry = InboxService::new()
                .get_inbox_entry_by_game(txn, drawer, game_id)
                .await?;

            assert_eq!(entry.game_id, game_id);
            assert_eq!(entry.previous_turn, TurnContent::Label("cat".to_string()));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_entry_uses_latest_completed_turn() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (a, b, c) = (unique_account_id(), unique_account_id(), unique_account_id());
            let (game_id, _) = seed_game(txn, |game_id| {
                vec![
                    TurnCreate::completed_label(game_id, a, "a boat"),
                    TurnCreate::completed_drawing(game_id, b, encoded(&sample_drawing(3))),
                    TurnCreate::completed_label(game_id, c, "a sinking boat"),
                    TurnCreate::pending_drawing(game_id, a),
                    TurnCreate::pending_label(game_id, b),
                ]
            })
            .await?;

            let entry = InboxService::new()
                .get_inbox_entry_by_game(txn, a, game_id)
                .await?;
            assert_eq!(
                entry.previous_turn,
                TurnContent::Label("a sinking boat".to_string())
            );

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_entry_missing_for_anyone_but_current_player() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (author, drawer, next) = (unique_account_id(), unique_account_id(), unique_account_id());
            let (game_id, _) = seed_cat_game(txn, author, drawer, next).await?;
            let service = InboxService::new();

            for user in [author, next, unique_account_id()] {
                let err = service
                    .get_inbox_entry_by_game(txn, user, game_id)
                    .await
                    .unwrap_err();
                assert!(err.is_no_such_entry(), "user {user}: {err:?}");
            }

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_entry_missing_for_unknown_game() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let err = InboxService::new()
                .get_inbox_entry_by_game(txn, unique_account_id(), 999_999_999)
                .await
                .unwrap_err();
            assert!(err.is_no_such_entry());

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_entry_missing_without_completed_or_pending_turns() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (a, b) = (unique_account_id(), unique_account_id());
            let service = InboxService::new();

            // Nothing completed yet: there is nothing to reply to.
            let (fresh, _) = seed_game(txn, |game_id| {
                vec![
                    TurnCreate::pending_label(game_id, a),
                    TurnCreate::pending_drawing(game_id, b),
                ]
            })
            .await?;
            let err = service.get_inbox_entry_by_game(txn, a, fresh).await.unwrap_err();
            assert!(err.is_no_such_entry());

            // Everything completed: nobody is being waited on.
            let (finished, _) = seed_game(txn, |game_id| {
                vec![
                    TurnCreate::completed_label(game_id, a, "end"),
                    TurnCreate::completed_drawing(game_id, b, encoded(&sample_drawing(4))),
                ]
            })
            .await?;
            for user in [a, b] {
                let err = service
                    .get_inbox_entry_by_game(txn, user, finished)
                    .await
                    .unwrap_err();
                assert!(err.is_no_such_entry());
            }

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_inbox_lists_waiting_games_in_id_order() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (me, other) = (unique_account_id(), unique_account_id());
            let drawing = sample_drawing(5);

            let (first, _) = seed_cat_game(txn, other, me, other).await?;
            let (not_mine, _) = seed_cat_game(txn, me, other, me).await?;
            let (second, _) = seed_game(txn, |game_id| {
                vec![
                    TurnCreate::completed_label(game_id, me, "tree"),
                    TurnCreate::completed_drawing(game_id, other, encoded(&drawing)),
                    TurnCreate::pending_label(game_id, me),
                ]
            })
            .await?;

            let inbox = InboxService::new().get_inbox_for_user(txn, me).await?;

            let games: Vec<i64> = inbox.iter().map(|e| e.game_id).collect();
            assert_eq!(games, vec![first, second]);
            assert!(!games.contains(&not_mine));
            assert_eq!(inbox[0].previous_turn, TurnContent::Label("cat".to_string()));
            // Bulk fetch carries the drawing, not just the flag.
            assert_eq!(inbox[1].previous_turn, TurnContent::Drawing(drawing));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_inbox_empty_for_idle_player() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let inbox = InboxService::new()
                .get_inbox_for_user(txn, unique_account_id())
                .await?;
            assert!(inbox.is_empty());

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_label_turn_payload_is_never_decoded() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (a, b) = (unique_account_id(), unique_account_id());
            let (game_id, _) = seed_game(txn, |game_id| {
                vec![
                    TurnCreate {
                        drawing: Some("this is not a drawing".to_string()),
                        ..TurnCreate::completed_label(game_id, a, "dog")
                    },
                    TurnCreate::pending_drawing(game_id, b),
                ]
            })
            .await?;

            let inbox = InboxService::new().get_inbox_for_user(txn, b).await?;
            assert_eq!(inbox.len(), 1);
            assert_eq!(inbox[0].game_id, game_id);
            assert_eq!(inbox[0].previous_turn, TurnContent::Label("dog".to_string()));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_malformed_drawing_is_a_decode_error() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (a, b) = (unique_account_id(), unique_account_id());
            let (game_id, _) = seed_game(txn, |game_id| {
                vec![
                    TurnCreate::completed_label(game_id, a, "fish"),
                    TurnCreate::completed_drawing(game_id, b, "{\"lines\": [oops"),
                    TurnCreate::pending_label(game_id, a),
                ]
            })
            .await?;
            let service = InboxService::new();

            let err = service.get_inbox_for_user(txn, a).await.unwrap_err();
            assert!(err.is_decode_error(), "{err:?}");

            let err = service
                .get_inbox_entry_by_game(txn, a, game_id)
                .await
                .unwrap_err();
            assert!(err.is_decode_error(), "{err:?}");

            Ok::<_, AppError>(())
        })
    })
    .await
}
