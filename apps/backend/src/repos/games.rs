//! Game repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::games_sea as games_adapter;
use crate::entities::games;
use crate::errors::domain::DomainError;

/// Game domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub created_at: OffsetDateTime,
    /// Deadline by which the next turn must be taken
    pub next_expiration: OffsetDateTime,
    pub completed_at: Option<OffsetDateTime>,
}

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            next_expiration: model.next_expiration,
            completed_at: model.completed_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    Ok(game.map(Game::from))
}

/// Find game by ID or return error if not found.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    let game = games_adapter::require_game(conn, game_id).await?;
    Ok(Game::from(game))
}

/// Insert a game. Turn creation for it is up to the caller.
pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    next_expiration: OffsetDateTime,
) -> Result<Game, DomainError> {
    let game =
        games_adapter::create_game(conn, games_adapter::GameCreate::expiring_at(next_expiration))
            .await?;
    Ok(Game::from(game))
}
