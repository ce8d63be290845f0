//! SeaORM adapter for games - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, Set,
};
use time::OffsetDateTime;

use crate::entities::games;

pub mod dto;

pub use dto::GameCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::Id.eq(game_id))
        .one(conn)
        .await
}

/// Find game by ID or return RecordNotFound error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Game not found".to_string()))
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let game_active = games::ActiveModel {
        id: NotSet,
        created_at: Set(OffsetDateTime::now_utc()),
        next_expiration: Set(dto.next_expiration),
        completed_at: Set(None),
    };

    game_active.insert(conn).await
}

/// Move the game's deadline. Returns the number of rows updated.
///
/// Takes a transaction so it can only run alongside the turn write it follows.
pub async fn set_next_expiration(
    txn: &DatabaseTransaction,
    game_id: i64,
    next_expiration: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = games::Entity::update_many()
        .col_expr(games::Column::NextExpiration, Expr::val(next_expiration).into())
        .filter(games::Column::Id.eq(game_id))
        .exec(txn)
        .await?;

    Ok(result.rows_affected)
}
