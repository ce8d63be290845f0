//! Inbox and turn-taking HTTP routes.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::domain::turn::{InboxEntry, TurnContent, TurnWire};
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::game_id::GameId;
use crate::extractors::validated_json::ValidatedJson;
use crate::services::inbox::InboxService;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct InboxResponse {
    pub inbox_entries: Vec<InboxEntry>,
}

#[derive(Debug, Serialize)]
pub struct InboxEntryResponse {
    pub inbox_entry: InboxEntry,
}

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    pub turn: TurnWire,
}

/// GET /api/2/games/inbox
async fn get_inbox(
    http_req: HttpRequest,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<InboxResponse>, AppError> {
    let inbox_entries = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { Ok(InboxService::new().get_inbox_for_user(txn, user.id).await?) })
    })
    .await?;

    Ok(web::Json(InboxResponse { inbox_entries }))
}

/// GET /api/2/games/inbox/{game_id}
async fn get_inbox_entry(
    http_req: HttpRequest,
    user: CurrentUser,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<InboxEntryResponse>, AppError> {
    let inbox_entry = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(InboxService::new()
                .get_inbox_entry_by_game(txn, user.id, game_id.0)
                .await?)
        })
    })
    .await?;

    Ok(web::Json(InboxEntryResponse { inbox_entry }))
}

/// PUT /api/2/games/play/{game_id}
///
/// Completes the caller's current turn. `204` on success, `409` when the
/// turn cannot be taken for any reason.
async fn play(
    http_req: HttpRequest,
    user: CurrentUser,
    game_id: GameId,
    body: ValidatedJson<PlayRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let content = TurnContent::try_from(body.into_inner().turn)?;

    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = InboxService::new();
            match &content {
                TurnContent::Drawing(drawing) => {
                    service.submit_drawing(txn, user.id, game_id.0, drawing).await?
                }
                TurnContent::Label(label) => {
                    service.submit_label(txn, user.id, game_id.0, label).await?
                }
            }
            Ok(())
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/inbox", web::get().to(get_inbox))
        .route("/inbox/{game_id}", web::get().to(get_inbox_entry))
        .route("/play/{game_id}", web::put().to(play));
}
