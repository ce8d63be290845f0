//! Adapter tests for games_sea.

use backend::adapters::games_sea::{self, GameCreate};
use backend::db::txn::with_txn;
use backend::error::AppError;
use backend::errors::domain::{DomainError, NotFoundKind};
use time::{Duration, OffsetDateTime};

use crate::support::build_test_state;

#[tokio::test]
async fn test_create_and_find_by_id() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let expires = OffsetDateTime::now_utc() + Duration::hours(6);
            let created = games_sea::create_game(txn, GameCreate::expiring_at(expires)).await?;

            assert!(created.id > 0);
            assert!(created.completed_at.is_none());
            assert_eq!(
                created.next_expiration.unix_timestamp(),
                expires.unix_timestamp()
            );

            let found = games_sea::find_by_id(txn, created.id)
                .await?
                .expect("game should exist");
            assert_eq!(found.id, created.id);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_require_game_missing_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let err = games_sea::require_game(txn, 987_654_321).await.unwrap_err();
            let domain = DomainError::from(err);
            assert!(matches!(
                domain,
                DomainError::NotFound(NotFoundKind::Other(_), _)
            ));
            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn test_set_next_expiration_only_touches_one_game() -> Result<(), AppError> {
    let state = build_test_state().await.expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let start = OffsetDateTime::now_utc() + Duration::hours(1);
            let a = games_sea::create_game(txn, GameCreate::expiring_at(start)).await?;
            let b = games_sea::create_game(txn, GameCreate::expiring_at(start)).await?;

            let later = start + Duration::days(3);
            let affected = games_sea::set_next_expiration(txn, a.id, later).await?;
            assert_eq!(affected, 1);

            let a = games_sea::require_game(txn, a.id).await?;
            let b = games_sea::require_game(txn, b.id).await?;
            assert_eq!(a.next_expiration.unix_timestamp(), later.unix_timestamp());
            assert_eq!(b.next_expiration.unix_timestamp(), start.unix_timestamp());

            Ok::<_, AppError>(())
        })
    })
    .await
}
