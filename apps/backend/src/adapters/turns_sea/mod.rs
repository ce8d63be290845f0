//! SeaORM adapter for turns - generic over ConnectionTrait.
//!
//! The "current turn" of a game is its incomplete turn with the lowest id.
//! Every write here is keyed on that row, inside one UPDATE statement.

use sea_orm::sea_query::{Alias, Expr, Func, JoinType, Order, Query, SelectStatement};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    FromQueryResult, NotSet, QueryFilter, QueryOrder, Set,
};

use crate::entities::turns;

pub mod dto;

pub use dto::{TurnCreate, TurnPayload};

/// One inbox row: the most recent completed turn of a game whose current
/// turn belongs to the requesting account.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct InboxRow {
    pub game_id: i64,
    pub turn_id: i64,
    pub is_drawing: bool,
    pub drawing: Option<String>,
    pub label: Option<String>,
}

pub async fn create_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TurnCreate,
) -> Result<turns::Model, sea_orm::DbErr> {
    let turn_active = turns::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        account_id: Set(dto.account_id),
        is_complete: Set(dto.is_complete),
        is_drawing: Set(dto.is_drawing),
        drawing: Set(dto.drawing),
        label: Set(dto.label),
    };

    turn_active.insert(conn).await
}

/// All turns of a game in play order.
pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<turns::Model>, sea_orm::DbErr> {
    turns::Entity::find()
        .filter(turns::Column::GameId.eq(game_id))
        .order_by_asc(turns::Column::Id)
        .all(conn)
        .await
}

/// `SELECT MIN(ct.id) FROM turns ct WHERE ct.game_id = ? AND NOT ct.is_complete`
fn current_turn_id(game_id: i64) -> SelectStatement {
    let ct = Alias::new("ct");

    Query::select()
        .expr(Func::min(Expr::col((ct.clone(), turns::Column::Id))))
        .from_as(turns::Entity, ct.clone())
        .and_where(Expr::col((ct.clone(), turns::Column::GameId)).eq(game_id))
        .and_where(Expr::col((ct, turns::Column::IsComplete)).eq(false))
        .to_owned()
}

/// Complete the current turn of `game_id` if it belongs to `user_id` and
/// expects `payload`'s kind. Returns the number of rows updated (0 or 1).
///
/// The row must still be incomplete when the write lands, so of two racing
/// submissions only the first to commit matches.
pub async fn complete_current_turn(
    txn: &DatabaseTransaction,
    user_id: i64,
    game_id: i64,
    payload: TurnPayload,
) -> Result<u64, sea_orm::DbErr> {
    let is_drawing = payload.is_drawing();
    let update = turns::Entity::update_many()
        .col_expr(turns::Column::IsComplete, Expr::val(true).into());
    let update = match payload {
        TurnPayload::Drawing(drawing) => {
            update.col_expr(turns::Column::Drawing, Expr::val(Some(drawing)).into())
        }
        TurnPayload::Label(label) => {
            update.col_expr(turns::Column::Label, Expr::val(Some(label)).into())
        }
    };

    let result = update
        .filter(turns::Column::GameId.eq(game_id))
        .filter(turns::Column::AccountId.eq(user_id))
        .filter(turns::Column::IsDrawing.eq(is_drawing))
        .filter(turns::Column::IsComplete.eq(false))
        .filter(turns::Column::Id.in_subquery(current_turn_id(game_id)))
        .exec(txn)
        .await?;

    Ok(result.rows_affected)
}

/// Inbox rows for `user_id`, optionally narrowed to one game, ordered by game id.
///
/// Joins each game's latest completed turn (`pt`) with its current turn
/// (`ct` picks the id, `cur` is that exact row) and keeps games whose
/// current turn is owned by `user_id`.
fn inbox_query(user_id: i64, game_id: Option<i64>) -> SelectStatement {
    let t = Alias::new("t");
    let pt = Alias::new("pt");
    let ct = Alias::new("ct");
    let cur = Alias::new("cur");
    let previous_turn_id = Alias::new("previous_turn_id");
    let current_turn_id = Alias::new("current_turn_id");

    let previous = Query::select()
        .column(turns::Column::GameId)
        .expr_as(Func::max(Expr::col(turns::Column::Id)), previous_turn_id.clone())
        .from(turns::Entity)
        .and_where(Expr::col(turns::Column::IsComplete).eq(true))
        .group_by_col(turns::Column::GameId)
        .to_owned();

    let current = Query::select()
        .column(turns::Column::GameId)
        .expr_as(Func::min(Expr::col(turns::Column::Id)), current_turn_id.clone())
        .from(turns::Entity)
        .and_where(Expr::col(turns::Column::IsComplete).eq(false))
        .group_by_col(turns::Column::GameId)
        .to_owned();

    let mut query = Query::select();
    query
        .expr_as(
            Expr::col((t.clone(), turns::Column::GameId)),
            Alias::new("game_id"),
        )
        .expr_as(Expr::col((t.clone(), turns::Column::Id)), Alias::new("turn_id"))
        .expr_as(
            Expr::col((t.clone(), turns::Column::IsDrawing)),
            Alias::new("is_drawing"),
        )
        .expr_as(
            Expr::col((t.clone(), turns::Column::Drawing)),
            Alias::new("drawing"),
        )
        .expr_as(Expr::col((t.clone(), turns::Column::Label)), Alias::new("label"))
        .from_as(turns::Entity, t.clone())
        .join_subquery(
            JoinType::InnerJoin,
            previous,
            pt.clone(),
            Expr::col((pt, previous_turn_id)).equals((t.clone(), turns::Column::Id)),
        )
        .join_subquery(
            JoinType::InnerJoin,
            current,
            ct.clone(),
            Expr::col((ct.clone(), turns::Column::GameId))
                .equals((t.clone(), turns::Column::GameId)),
        )
        .join_as(
            JoinType::InnerJoin,
            turns::Entity,
            cur.clone(),
            Expr::col((cur.clone(), turns::Column::Id)).equals((ct, current_turn_id)),
        )
        .and_where(Expr::col((cur, turns::Column::AccountId)).eq(user_id));

    if let Some(game_id) = game_id {
        query.and_where(Expr::col((t.clone(), turns::Column::GameId)).eq(game_id));
    }

    query
        .order_by((t, turns::Column::GameId), Order::Asc)
        .to_owned()
}

pub async fn fetch_inbox_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    game_id: i64,
) -> Result<Option<InboxRow>, sea_orm::DbErr> {
    let stmt = conn
        .get_database_backend()
        .build(&inbox_query(user_id, Some(game_id)));
    InboxRow::find_by_statement(stmt).one(conn).await
}

pub async fn fetch_all_inbox_entries<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<InboxRow>, sea_orm::DbErr> {
    let stmt = conn
        .get_database_backend()
        .build(&inbox_query(user_id, None));
    InboxRow::find_by_statement(stmt).all(conn).await
}
