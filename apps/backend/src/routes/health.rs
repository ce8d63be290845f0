use actix_web::{web, HttpResponse};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::db::require_db;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations: &'static str,
    time: String,
}

struct DbProbe {
    db: &'static str,
    db_error: Option<String>,
    migrations: &'static str,
}

impl DbProbe {
    fn failed(detail: String) -> Self {
        Self {
            db: "error",
            db_error: Some(detail),
            migrations: "unknown",
        }
    }
}

async fn probe(db: &DatabaseConnection) -> DbProbe {
    let ping = Statement::from_string(db.get_database_backend(), "SELECT 1 AS health_check");
    if let Err(e) = db.query_one(ping).await {
        return DbProbe::failed(format!("DB query failed: {e}"));
    }

    let migrations = match migration::is_up_to_date(db).await {
        Ok(true) => "up_to_date",
        Ok(false) => "pending",
        Err(_) => "unknown",
    };
    DbProbe {
        db: "ok",
        db_error: None,
        migrations,
    }
}

/// GET /health
///
/// Always 200 while the process is serving; the store's state is reported in
/// the body.
async fn health(app_state: web::Data<AppState>) -> HttpResponse {
    let probe = match require_db(&app_state) {
        Ok(db) => probe(db).await,
        Err(e) => DbProbe::failed(format!("DB unavailable: {e}")),
    };

    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db: probe.db,
        db_error: probe.db_error,
        migrations: probe.migrations,
        time,
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
