//! Turn store: atomic turn completion and inbox projections.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::adapters::games_sea as games_adapter;
use crate::adapters::turns_sea::{self as turns_adapter, InboxRow, TurnCreate, TurnPayload};
use crate::domain::drawing::{self, Drawing};
use crate::domain::turn::{InboxEntry, Turn, TurnContent, TurnKind};
use crate::entities::turns;
use crate::errors::domain::DomainError;

/// How far a game's deadline moves on every completed turn.
pub const TURN_EXPIRATION: Duration = Duration::days(2);

impl TryFrom<turns::Model> for Turn {
    type Error = DomainError;

    fn try_from(model: turns::Model) -> Result<Self, Self::Error> {
        let content = if model.is_complete {
            Some(TurnContent::from_columns(
                model.is_drawing,
                model.drawing.as_deref(),
                model.label.as_deref(),
            )?)
        } else {
            None
        };

        Ok(Self {
            id: model.id,
            game_id: model.game_id,
            account_id: model.account_id,
            kind: TurnKind::from_is_drawing(model.is_drawing),
            is_complete: model.is_complete,
            content,
        })
    }
}

impl TryFrom<InboxRow> for InboxEntry {
    type Error = DomainError;

    fn try_from(row: InboxRow) -> Result<Self, Self::Error> {
        let previous_turn =
            TurnContent::from_columns(row.is_drawing, row.drawing.as_deref(), row.label.as_deref())?;
        Ok(Self {
            game_id: row.game_id,
            previous_turn,
        })
    }
}

/// The inbox entry for one game, if `user_id` owns that game's current turn.
pub async fn fetch_inbox_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    game_id: i64,
) -> Result<Option<InboxEntry>, DomainError> {
    turns_adapter::fetch_inbox_entry(conn, user_id, game_id)
        .await?
        .map(InboxEntry::try_from)
        .transpose()
}

/// Every game whose current turn is owned by `user_id`, by game id.
pub async fn fetch_all_inbox_entries<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<InboxEntry>, DomainError> {
    turns_adapter::fetch_all_inbox_entries(conn, user_id)
        .await?
        .into_iter()
        .map(InboxEntry::try_from)
        .collect()
}

/// Complete the game's current turn with a drawing. Returns rows affected (0 or 1).
pub async fn complete_drawing_turn(
    txn: &DatabaseTransaction,
    user_id: i64,
    game_id: i64,
    drawing: &Drawing,
) -> Result<u64, DomainError> {
    let encoded = drawing::encode(drawing)?;
    complete_turn(txn, user_id, game_id, TurnPayload::Drawing(encoded)).await
}

/// Complete the game's current turn with a label. Returns rows affected (0 or 1).
pub async fn complete_label_turn(
    txn: &DatabaseTransaction,
    user_id: i64,
    game_id: i64,
    label: &str,
) -> Result<u64, DomainError> {
    complete_turn(txn, user_id, game_id, TurnPayload::Label(label.to_string())).await
}

async fn complete_turn(
    txn: &DatabaseTransaction,
    user_id: i64,
    game_id: i64,
    payload: TurnPayload,
) -> Result<u64, DomainError> {
    let affected = turns_adapter::complete_current_turn(txn, user_id, game_id, payload).await?;
    if affected == 0 {
        return Ok(0);
    }

    let next_expiration = OffsetDateTime::now_utc() + TURN_EXPIRATION;
    games_adapter::set_next_expiration(txn, game_id, next_expiration).await?;
    debug!(game_id, %next_expiration, "game expiration advanced");

    Ok(affected)
}

pub async fn create_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TurnCreate,
) -> Result<Turn, DomainError> {
    let turn = turns_adapter::create_turn(conn, dto).await?;
    Turn::try_from(turn)
}

/// All turns of a game in play order.
pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Turn>, DomainError> {
    turns_adapter::find_by_game(conn, game_id)
        .await?
        .into_iter()
        .map(Turn::try_from)
        .collect()
}
