//! DTOs for games_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a new game.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub next_expiration: OffsetDateTime,
}

impl GameCreate {
    pub fn expiring_at(next_expiration: OffsetDateTime) -> Self {
        Self { next_expiration }
    }
}
