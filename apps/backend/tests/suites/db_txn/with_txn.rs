use std::sync::{Arc, Mutex};

use actix_web::{test, HttpMessage};
use backend::db::require_db;
use backend::db::txn::with_txn;
use backend::db::txn_policy::{self, TxnPolicy};
use backend::error::AppError;
use backend::repos::games;

use crate::support::build_test_state;
use crate::support::factory::initial_expiration;
use crate::support::shared_txn;

#[tokio::test]
async fn test_err_rolls_back() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let created = Arc::new(Mutex::new(None));

    let stash = created.clone();
    let result: Result<(), AppError> = with_txn(None, &state, |txn| {
        Box::pin(async move {
            let game = games::create_game(txn, initial_expiration()).await?;
            *stash.lock().expect("lock") = Some(game.id);
            Err(AppError::internal("boom"))
        })
    })
    .await;
    assert!(result.is_err());

    let id = created.lock().expect("lock").expect("game was created");
    let db = require_db(&state)?;
    assert!(games::find_by_id(db, id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_ok_follows_policy() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let id = with_txn(None, &state, |txn| {
        Box::pin(async move { Ok(games::create_game(txn, initial_expiration()).await?.id) })
    })
    .await?;

    let db = require_db(&state)?;
    let visible = games::find_by_id(db, id).await?.is_some();
    match txn_policy::current() {
        TxnPolicy::CommitOnOk => assert!(visible),
        TxnPolicy::RollbackOnOk => assert!(!visible),
    }

    Ok(())
}

#[actix_web::test]
async fn test_shared_txn_is_reused() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let shared = shared_txn::open(require_db(&state)?).await;

    let req = test::TestRequest::default().to_http_request();
    req.extensions_mut().insert(shared.clone());

    let id = with_txn(Some(&req), &state, |txn| {
        Box::pin(async move { Ok(games::create_game(txn, initial_expiration()).await?.id) })
    })
    .await?;

    // Still open: visible inside, and with_txn did not end it.
    assert!(games::find_by_id(shared.transaction(), id).await?.is_some());

    drop(req);
    shared_txn::rollback(shared).await?;

    let db = require_db(&state)?;
    assert!(games::find_by_id(db, id).await?.is_none());

    Ok(())
}
