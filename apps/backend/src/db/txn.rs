use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::warn;

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// A transaction injected into request extensions and reused by `with_txn`
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    pub fn from_req(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<SharedTxn>().cloned()
    }
}

/// Execute a function within a database transaction
///
/// 1) If a SharedTxn is in request extensions, use it (no commit/rollback here)
/// 2) Otherwise begin a transaction, run the closure, apply the policy on Ok
///    and roll back on Err
///
/// Callers pass `|txn| Box::pin(async move { ... })`.
pub async fn with_txn<R, F>(req: Option<&HttpRequest>, state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> LocalBoxFuture<'a, Result<R, AppError>>,
{
    // Clone out of extensions before awaiting so no RefCell borrow is held.
    if let Some(shared) = req.and_then(SharedTxn::from_req) {
        return f(shared.transaction()).await;
    }

    let db = require_db(state)?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn_policy::current().settle(txn).await?;
            Ok(val)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback failed; preserving original error");
            }
            Err(err)
        }
    }
}
