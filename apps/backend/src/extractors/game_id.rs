use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Game ID extracted from the `{game_id}` path segment.
///
/// Only the shape is checked. Whether the game exists is left to the inbox
/// queries, which answer the same way for unknown games and foreign ones.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct GameId(pub i64);

impl GameId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let game_id = raw.parse::<i64>().map_err(|_| {
            AppError::bad_request(ErrorCode::InvalidGameId, format!("Invalid game id: {raw}"))
        })?;

        if game_id <= 0 {
            return Err(AppError::bad_request(
                ErrorCode::InvalidGameId,
                format!("Game id must be positive, got: {game_id}"),
            ));
        }

        Ok(GameId(game_id))
    }
}

impl FromRequest for GameId {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("game_id")
            .ok_or_else(|| {
                AppError::bad_request(ErrorCode::InvalidGameId, "Missing game_id parameter")
            })
            .and_then(GameId::parse);
        std::future::ready(result)
    }
}
