//! Turns as tagged content, and the inbox projection built from them.

use serde::{Deserialize, Serialize, Serializer};

use super::drawing::{self, Drawing};
use crate::errors::domain::{DomainError, ValidationKind};

/// What a turn asks its player to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    Drawing,
    Label,
}

impl TurnKind {
    pub fn from_is_drawing(is_drawing: bool) -> Self {
        if is_drawing {
            TurnKind::Drawing
        } else {
            TurnKind::Label
        }
    }
}

/// The payload of a completed turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnContent {
    Drawing(Drawing),
    Label(String),
}

impl TurnContent {
    /// Build content from stored columns.
    ///
    /// Only drawing turns have their payload parsed; a label turn's
    /// `drawing` column is never looked at.
    pub fn from_columns(
        is_drawing: bool,
        drawing: Option<&str>,
        label: Option<&str>,
    ) -> Result<Self, DomainError> {
        if is_drawing {
            let raw = drawing
                .ok_or_else(|| DomainError::decode("Completed drawing turn has no drawing"))?;
            Ok(TurnContent::Drawing(drawing::decode(raw)?))
        } else {
            let label =
                label.ok_or_else(|| DomainError::decode("Completed label turn has no label"))?;
            Ok(TurnContent::Label(label.to_string()))
        }
    }
}

/// JSON shape of a turn exchanged with clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnWire {
    pub is_drawing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drawing: Option<Drawing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl From<&TurnContent> for TurnWire {
    fn from(content: &TurnContent) -> Self {
        match content {
            TurnContent::Drawing(d) => TurnWire {
                is_drawing: true,
                drawing: Some(d.clone()),
                label: None,
            },
            TurnContent::Label(l) => TurnWire {
                is_drawing: false,
                drawing: None,
                label: Some(l.clone()),
            },
        }
    }
}

impl TryFrom<TurnWire> for TurnContent {
    type Error = DomainError;

    fn try_from(wire: TurnWire) -> Result<Self, Self::Error> {
        match (wire.is_drawing, wire.drawing, wire.label) {
            (true, Some(drawing), None) => Ok(TurnContent::Drawing(drawing)),
            (false, None, Some(label)) => Ok(TurnContent::Label(label)),
            (true, _, _) => Err(DomainError::validation(
                ValidationKind::InvalidTurn,
                "A drawing turn must carry a drawing and no label",
            )),
            (false, _, _) => Err(DomainError::validation(
                ValidationKind::InvalidTurn,
                "A label turn must carry a label and no drawing",
            )),
        }
    }
}

impl Serialize for TurnContent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        TurnWire::from(self).serialize(serializer)
    }
}

/// A turn row in domain form. `content` is `None` until the turn is complete.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub id: i64,
    pub game_id: i64,
    pub account_id: i64,
    pub kind: TurnKind,
    pub is_complete: bool,
    pub content: Option<TurnContent>,
}

/// Something a player needs to act on: the game, and the turn they reply to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InboxEntry {
    pub game_id: i64,
    pub previous_turn: TurnContent,
}
