use std::future::Future;
use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::{info, warn};

use crate::config::db::{make_conn_spec, DbKind, DbOwner, RuntimeEnv};
use crate::error::AppError;

fn db_engine(kind: DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Retry a connection attempt with fixed interval delays.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| AppError::config("connection retry failed without recording an error")))
}

fn connect_options(url: &str, kind: DbKind) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url);
    opt.acquire_timeout(Duration::from_secs(5)).sqlx_logging(false);

    match kind {
        DbKind::Postgres => {
            opt.min_connections(1).max_connections(10);
        }
        // Every in-memory connection is its own database, so the pool must
        // hold exactly one for the lifetime of the process.
        DbKind::SqliteMemory => {
            opt.min_connections(1)
                .max_connections(1)
                .idle_timeout(Duration::from_secs(24 * 60 * 60))
                .max_lifetime(Duration::from_secs(24 * 60 * 60));
        }
        DbKind::SqliteFile => {
            opt.min_connections(1).max_connections(1);
        }
    }
    opt
}

/// Open a connection pool. This function does NOT run any migrations.
pub async fn connect_db(
    env: RuntimeEnv,
    kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let url = make_conn_spec(env, kind, owner)?;
    let opt = connect_options(&url, kind);

    let conn = if kind == DbKind::Postgres {
        retry_connection(
            || {
                let opt = opt.clone();
                async move {
                    Database::connect(opt)
                        .await
                        .map_err(|e| AppError::config(format!("failed to connect to Postgres: {e}")))
                }
            },
            5,
            500,
        )
        .await?
    } else {
        Database::connect(opt)
            .await
            .map_err(|e| AppError::config(format!("failed to connect to SQLite: {e}")))?
    };

    if kind != DbKind::Postgres {
        conn.execute(Statement::from_string(
            conn.get_database_backend(),
            "PRAGMA foreign_keys = ON;",
        ))
        .await?;
    }

    info!(engine = db_engine(kind), env = ?env, "database connected");
    Ok(conn)
}

/// Connect and bring the schema up to date.
///
/// Postgres migrates on a short-lived owner pool. SQLite migrates on the app
/// connection, since a memory database only exists inside it.
pub async fn bootstrap_db(env: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    match kind {
        DbKind::Postgres => {
            let admin = connect_db(env, kind, DbOwner::Owner).await?;
            migrate_if_needed(&admin).await?;
            admin
                .close()
                .await
                .map_err(|e| AppError::config(format!("failed to close admin pool: {e}")))?;
            connect_db(env, kind, DbOwner::App).await
        }
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            let conn = connect_db(env, kind, DbOwner::App).await?;
            migrate_if_needed(&conn).await?;
            Ok(conn)
        }
    }
}

async fn migrate_if_needed(conn: &DatabaseConnection) -> Result<(), AppError> {
    let up_to_date = migration::is_up_to_date(conn)
        .await
        .map_err(|e| AppError::config(format!("failed to read migration state: {e}")))?;

    if up_to_date {
        info!("schema up to date; skipping migrations");
        return Ok(());
    }

    migration::migrate(conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migration failed: {e}")))
}
