//! Inbound player actions.
//!
//! The payload is a closed tagged union so every handler matches
//! exhaustively; adding an action type is a compile-enforced change.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::pieces_types::Piece;

/// Discriminant of an action payload, for logging and phase gating.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Declare,
    PlayPieces,
    RedealResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionPayload {
    /// Declare a pile count for the round.
    Declare {
        count: u8,
        /// Marks declarations generated on a player's behalf (bot
        /// fallback, timeout). Recorded verbatim; no rule effect.
        #[serde(default)]
        forced: bool,
    },
    /// Put pieces down for the current turn.
    PlayPieces { pieces: Vec<Piece> },
    /// Accept or decline a weak-hand redeal.
    RedealResponse { accept: bool },
}

impl ActionPayload {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionPayload::Declare { .. } => ActionKind::Declare,
            ActionPayload::PlayPieces { .. } => ActionKind::PlayPieces,
            ActionPayload::RedealResponse { .. } => ActionKind::RedealResponse,
        }
    }
}

/// One player input unit.
///
/// `seq` is assigned by the action queue at buffering time and decides
/// processing order. An externally supplied value is never trusted: the
/// queue overwrites it unconditionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameAction {
    pub player: String,
    pub payload: ActionPayload,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub seq: Option<u64>,
}

impl GameAction {
    pub fn new(player: impl Into<String>, payload: ActionPayload) -> Self {
        Self {
            player: player.into(),
            payload,
            timestamp: OffsetDateTime::now_utc(),
            seq: None,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.payload.kind()
    }
}
