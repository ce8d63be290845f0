//! DTOs for turns_sea adapter.

/// DTO for inserting a turn row.
///
/// Incomplete turns carry no payload; completed fixtures set exactly one of
/// `drawing` or `label` to match `is_drawing`.
#[derive(Debug, Clone)]
pub struct TurnCreate {
    pub game_id: i64,
    pub account_id: i64,
    pub is_drawing: bool,
    pub is_complete: bool,
    pub drawing: Option<String>,
    pub label: Option<String>,
}

impl TurnCreate {
    /// A turn waiting for `account_id` to draw.
    pub fn pending_drawing(game_id: i64, account_id: i64) -> Self {
        Self {
            game_id,
            account_id,
            is_drawing: true,
            is_complete: false,
            drawing: None,
            label: None,
        }
    }

    /// A turn waiting for `account_id` to describe the previous drawing.
    pub fn pending_label(game_id: i64, account_id: i64) -> Self {
        Self {
            is_drawing: false,
            ..Self::pending_drawing(game_id, account_id)
        }
    }

    pub fn completed_drawing(game_id: i64, account_id: i64, drawing: impl Into<String>) -> Self {
        Self {
            is_complete: true,
            drawing: Some(drawing.into()),
            ..Self::pending_drawing(game_id, account_id)
        }
    }

    pub fn completed_label(game_id: i64, account_id: i64, label: impl Into<String>) -> Self {
        Self {
            is_complete: true,
            label: Some(label.into()),
            ..Self::pending_label(game_id, account_id)
        }
    }
}

/// Payload written when a turn is completed.
#[derive(Debug, Clone)]
pub enum TurnPayload {
    /// Encoded drawing text
    Drawing(String),
    Label(String),
}

impl TurnPayload {
    pub fn is_drawing(&self) -> bool {
        matches!(self, TurnPayload::Drawing(_))
    }
}
