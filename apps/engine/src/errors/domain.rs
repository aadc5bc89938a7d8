//! Domain-level error type used across the engine.
//!
//! This error type is transport-agnostic. Action rejections are NOT errors:
//! a phase signals rejection through its return value so the caller can
//! relay a reason to the player (see `engine::game::ActionOutcome`). Errors
//! here are reserved for invalid value-object construction and for internal
//! invariant violations that are fatal to a game instance.

use thiserror::Error;

/// Validation kinds to distinguish business-rule violations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    PileCountOutOfRange,
    EmptyPlayerName,
    EmptyDeclarationSet,
    DuplicatePlayer,
    ForbiddenDeclarationTotal,
    EmptyPlay,
    PieceNotInHand,
    OutOfTurn,
    PhaseMismatch,
    WrongActionType,
    InvalidPlayerCount,
    ParsePiece,
    Other(String),
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Malformed construction of a value object or rule violation.
    #[error("validation {kind:?}: {detail}")]
    Validation {
        kind: ValidationKind,
        detail: String,
    },
    /// Unrecognized piece identifier at creation.
    #[error("invalid piece kind: {0}")]
    InvalidPieceKind(String),
    /// Invariant violation inside the state machine. Fatal to the game
    /// instance; never silently recovered.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            detail: detail.into(),
        }
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation {
            kind: ValidationKind::Other(detail.clone()),
            detail,
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }
}
