//! Inbox/turn engine: what a player has to act on, and taking turns.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::info;

use crate::domain::drawing::Drawing;
use crate::domain::turn::InboxEntry;
use crate::errors::domain::DomainError;
use crate::repos::turns;

/// Turn-taking service.
///
/// Reads go through any connection. Submissions need the caller's
/// transaction so the turn write and the expiration bump commit together.
#[derive(Debug, Clone, Copy, Default)]
pub struct InboxService;

impl InboxService {
    pub fn new() -> Self {
        Self
    }

    /// The entry for `game_id` if `user_id` is the player being waited on.
    ///
    /// Fails with `NoSuchEntry` for a wrong user, an unknown game, or a game
    /// with nothing left to play.
    pub async fn get_inbox_entry_by_game<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
        game_id: i64,
    ) -> Result<InboxEntry, DomainError> {
        let entry = turns::fetch_inbox_entry(conn, user_id, game_id).await?;
        info!(user_id, game_id, found = entry.is_some(), "inbox entry lookup");
        entry.ok_or_else(DomainError::no_such_entry)
    }

    /// Every game waiting on `user_id`, ordered by game id.
    pub async fn get_inbox_for_user<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Vec<InboxEntry>, DomainError> {
        let entries = turns::fetch_all_inbox_entries(conn, user_id).await?;
        info!(user_id, entries = entries.len(), "inbox loaded");
        Ok(entries)
    }

    pub async fn submit_drawing(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        game_id: i64,
        drawing: &Drawing,
    ) -> Result<(), DomainError> {
        let affected = turns::complete_drawing_turn(txn, user_id, game_id, drawing).await?;
        Self::accepted(affected, user_id, game_id, "drawing")
    }

    pub async fn submit_label(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        game_id: i64,
        label: &str,
    ) -> Result<(), DomainError> {
        let affected = turns::complete_label_turn(txn, user_id, game_id, label).await?;
        Self::accepted(affected, user_id, game_id, "label")
    }

    // Zero rows covers every reason a turn cannot be taken; they are not told apart.
    fn accepted(affected: u64, user_id: i64, game_id: i64, kind: &str) -> Result<(), DomainError> {
        if affected == 0 {
            info!(user_id, game_id, kind, "turn rejected");
            return Err(DomainError::turn_rejected());
        }
        info!(user_id, game_id, kind, "turn completed");
        Ok(())
    }
}
