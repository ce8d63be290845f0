//! Error codes for the pifuxelck backend API.
//!
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear
//! in HTTP responses. Add new codes here; never pass ad-hoc strings.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Authentication required
    Unauthorized,
    /// Missing auth header or bearer token
    UnauthorizedMissingToken,
    /// Token failed verification
    UnauthorizedInvalidJwt,
    /// Token has expired
    UnauthorizedExpiredJwt,

    // Request Validation
    InvalidGameId,
    /// Turn body does not match its `is_drawing` flag
    InvalidTurn,
    ValidationError,
    BadRequest,

    // Resource Not Found
    /// No inbox entry awaits this user for the game
    InboxEntryNotFound,
    NotFound,

    // Conflicts
    /// A turn submission matched no turn row
    TurnRejected,
    UniqueViolation,
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    Internal,
    ConfigError,
    DataCorruption,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingToken => "UNAUTHORIZED_MISSING_TOKEN",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",

            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidTurn => "INVALID_TURN",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::InboxEntryNotFound => "INBOX_ENTRY_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::TurnRejected => "TURN_REJECTED",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
