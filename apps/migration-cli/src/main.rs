use backend::config::db::{DbKind, DbOwner, RuntimeEnv};
use backend::infra::db::connect_db;
use clap::{Parser, ValueEnum};
use migration::{migrate, MigrationCommand};
use tracing::{error, info};

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

/// In-memory SQLite is not offered: the schema would vanish when the command exits.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "pifuxelck database migration tool")]
struct Args {
    /// up | down | fresh | reset | refresh | status
    command: String,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Database type
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,migration_cli=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let command = match args.command.parse::<MigrationCommand>() {
        Ok(command) => command,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };

    let env = match args.env {
        Env::Prod => RuntimeEnv::Prod,
        Env::Test => RuntimeEnv::Test,
    };

    let db_kind = match args.db {
        Db::Postgres => DbKind::Postgres,
        Db::SqliteFile => DbKind::SqliteFile,
    };

    // Schema changes need the owner role.
    let db = match connect_db(env, db_kind, DbOwner::Owner).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "failed to connect");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&db, command).await {
        error!(error = %e, "migration failed");
        std::process::exit(1);
    }

    info!(?command, "migration finished");
}
