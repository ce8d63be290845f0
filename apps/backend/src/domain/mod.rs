//! Domain layer: drawings, turns and inbox projections.

pub mod drawing;
pub mod turn;

pub use drawing::{Color, Drawing, Line, Point};
pub use turn::{InboxEntry, Turn, TurnContent, TurnKind, TurnWire};
