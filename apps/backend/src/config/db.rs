use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Runtime environment selects database names and safety rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    /// Test environment - database names must end with `_test`
    Test,
}

/// Which storage engine backs the turn store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite_file" | "sqlite" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "Unknown database kind '{other}' (expected postgres | sqlite-file | sqlite-memory)"
            ))),
        }
    }
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Build the connection string for the given environment, engine and owner.
pub fn make_conn_spec(env: RuntimeEnv, kind: DbKind, owner: DbOwner) -> Result<String, AppError> {
    match kind {
        DbKind::Postgres => postgres_url(env, owner),
        DbKind::SqliteFile => Ok(format!("sqlite://{}?mode=rwc", sqlite_file_path(env)?)),
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

fn postgres_url(env: RuntimeEnv, owner: DbOwner) -> Result<String, AppError> {
    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = db_name(env)?;
    let (username, password) = credentials(owner)?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn db_name(env: RuntimeEnv) -> Result<String, AppError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test environment requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn credentials(owner: DbOwner) -> Result<(String, String), AppError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((
            must_var("PIFUXELCK_OWNER_USER")?,
            must_var("PIFUXELCK_OWNER_PASSWORD")?,
        )),
    }
}

/// Path of the SQLite database file for the environment.
pub fn sqlite_file_path(env: RuntimeEnv) -> Result<String, AppError> {
    let dir = env::var("SQLITE_DB_DIR").unwrap_or_else(|_| "./data".to_string());
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        return Err(AppError::config("SQLITE_DB_DIR must not be empty"));
    }
    let file = match env {
        RuntimeEnv::Prod => "pifuxelck.db",
        RuntimeEnv::Test => "pifuxelck_test.db",
    };
    Ok(format!("{dir}/{file}"))
}

/// Database kind from `PIFUXELCK_DB_KIND`, defaulting to Postgres.
pub fn db_kind_from_env() -> Result<DbKind, AppError> {
    match env::var("PIFUXELCK_DB_KIND") {
        Ok(raw) => raw.parse(),
        Err(env::VarError::NotPresent) => Ok(DbKind::Postgres),
        Err(e) => Err(AppError::config(format!(
            "failed to read PIFUXELCK_DB_KIND: {e}"
        ))),
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
