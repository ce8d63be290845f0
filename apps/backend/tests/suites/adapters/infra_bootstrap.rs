use backend::config::db::{DbKind, RuntimeEnv};
use backend::infra::db::bootstrap_db;
use migration::{count_applied_migrations, is_up_to_date};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use crate::support::test_state::resolve_test_db_kind;

async fn assert_runtime_is_app_pg(conn: &DatabaseConnection) {
    let res = conn
        .execute(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "CREATE TABLE __should_fail(id int)",
        ))
        .await;
    assert!(res.is_err(), "App user unexpectedly created a table");
}

#[tokio::test]
async fn owner_split_and_permissions_hold() {
    let db_kind = resolve_test_db_kind().expect("Failed to resolve DB kind");

    // Only Postgres has the owner/app role split
    if matches!(db_kind, DbKind::SqliteFile | DbKind::SqliteMemory) {
        return;
    }

    let pool = bootstrap_db(RuntimeEnv::Test, db_kind)
        .await
        .expect("bootstrap");
    assert_runtime_is_app_pg(&pool).await;
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db_kind = resolve_test_db_kind().expect("Failed to resolve DB kind");

    let pool1 = bootstrap_db(RuntimeEnv::Test, db_kind)
        .await
        .expect("bootstrap-1");
    let before = count_applied_migrations(&pool1).await.unwrap_or(0);

    let pool2 = bootstrap_db(RuntimeEnv::Test, db_kind)
        .await
        .expect("bootstrap-2");
    let after = count_applied_migrations(&pool2).await.unwrap_or(0);

    assert!(before >= 1, "init migration should be applied");
    assert_eq!(before, after, "migration count changed on second bootstrap");
    assert!(is_up_to_date(&pool2).await.expect("status query"));
}

#[tokio::test]
async fn schema_has_turn_tables() {
    let db_kind = resolve_test_db_kind().expect("Failed to resolve DB kind");

    let pool = bootstrap_db(RuntimeEnv::Test, db_kind)
        .await
        .expect("bootstrap");
    let backend = pool.get_database_backend();

    for table in ["games", "turns"] {
        let res = pool
            .query_one(Statement::from_string(
                backend,
                format!("SELECT COUNT(*) AS n FROM {table}"),
            ))
            .await;
        assert!(res.is_ok(), "table {table} should exist: {res:?}");
    }
}
