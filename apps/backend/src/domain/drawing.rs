//! Drawing model and its persisted JSON form.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::domain::{DomainError, ValidationKind};

/// RGBA colour with each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    fn is_finite(&self) -> bool {
        [self.red, self.green, self.blue, self.alpha]
            .iter()
            .all(|c| c.is_finite())
    }

    pub const WHITE: Color = Color {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
        alpha: 1.0,
    };

    pub const BLACK: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 1.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One stroke: a brush colour and size dragged through `points` in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub color: Color,
    pub size: f64,
    pub points: Vec<Point>,
}

/// An ordered sequence of strokes over a background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub background_color: Color,
    pub lines: Vec<Line>,
}

impl Drawing {
    /// True when every channel, size and coordinate is a finite number.
    /// JSON has no NaN or infinity, so anything else cannot be stored.
    pub fn is_finite(&self) -> bool {
        self.background_color.is_finite()
            && self.lines.iter().all(|line| {
                line.color.is_finite()
                    && line.size.is_finite()
                    && line.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
            })
    }
}

/// Serialize a drawing to the text stored in `turns.drawing`.
///
/// Non-finite numbers are rejected here; serde_json would write them as
/// `null` and the stored payload could never be decoded again.
pub fn encode(drawing: &Drawing) -> Result<String, DomainError> {
    if !drawing.is_finite() {
        return Err(DomainError::validation(
            ValidationKind::InvalidTurn,
            "Drawing contains a non-finite number",
        ));
    }
    serde_json::to_string(drawing).map_err(|e| {
        DomainError::validation(
            ValidationKind::InvalidTurn,
            format!("Drawing could not be serialized: {e}"),
        )
    })
}

/// Parse a stored drawing payload.
///
/// A payload that does not parse is data corruption and surfaces as a
/// decode error. The payload itself only goes to debug logs.
pub fn decode(raw: &str) -> Result<Drawing, DomainError> {
    serde_json::from_str(raw).map_err(|e| {
        debug!(payload = raw, error = %e, "stored drawing failed to decode");
        DomainError::decode(format!("Stored drawing is malformed: {e}"))
    })
}
