use std::sync::Arc;

use backend::db::txn::SharedTxn;
use sea_orm::{DatabaseConnection, TransactionTrait};

/// Begin a database transaction and wrap it as a SharedTxn.
///
/// Tests own the transaction lifecycle - this function does not commit or rollback.
pub async fn open(conn: &DatabaseConnection) -> SharedTxn {
    let txn = conn.begin().await.expect("Failed to begin transaction");
    SharedTxn(Arc::new(txn))
}

/// Rollback a shared transaction.
///
/// If a clone is still alive the transaction is rolled back when the last one drops.
pub async fn rollback(shared: SharedTxn) -> Result<(), sea_orm::DbErr> {
    match Arc::try_unwrap(shared.0) {
        Ok(txn) => txn.rollback().await,
        Err(_) => Ok(()),
    }
}
