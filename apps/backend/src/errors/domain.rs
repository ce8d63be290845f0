//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and DB-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! through `From<DomainError> for AppError`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    /// Persisted data could not be decoded (e.g. a malformed drawing payload)
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    /// No inbox projection exists for this user/game pair
    InboxEntry,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// A turn write matched zero rows. Deliberately does not say why.
    TurnRejected,
    UniqueViolation,
    Other(String),
}

/// Validation kinds for request-shape failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidTurn,
    InvalidGameId,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation failure
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// The requested inbox entry does not exist for this user.
    pub fn no_such_entry() -> Self {
        Self::not_found(NotFoundKind::InboxEntry, "No inbox entry for that game")
    }

    /// The turn could not be taken. Callers must not learn why.
    pub fn turn_rejected() -> Self {
        Self::conflict(
            ConflictKind::TurnRejected,
            "Unable to take a turn at this time",
        )
    }

    /// A persisted drawing failed to decode.
    pub fn decode(detail: impl Into<String>) -> Self {
        Self::infra(InfraErrorKind::DataCorruption, detail)
    }

    pub fn is_no_such_entry(&self) -> bool {
        matches!(self, Self::NotFound(NotFoundKind::InboxEntry, _))
    }

    pub fn is_turn_rejected(&self) -> bool {
        matches!(self, Self::Conflict(ConflictKind::TurnRejected, _))
    }

    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Infra(InfraErrorKind::DataCorruption, _))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e)
    }
}
