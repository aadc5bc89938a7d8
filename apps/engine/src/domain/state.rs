use serde::{Deserialize, Serialize};

use crate::domain::declaration::DeclarationSet;
use crate::domain::pieces_types::Piece;
use crate::domain::rules::PLAYERS;
use crate::domain::turn_resolution::TurnResult;
use crate::errors::domain::DomainError;

pub type Seat = usize; // 0..=3

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    /// Game created but not yet started.
    Waiting,
    /// Deal hands, resolve weak-hand redeal votes.
    Preparation,
    /// Players declare pile counts in fixed turn order.
    Declaration,
    /// Piece play, one pile awarded per turn.
    Turn,
    /// Tally round scores, decide next round or game over.
    Scoring,
    /// Terminal.
    GameOver,
}

/// One player's cross-round state. Per-round working data (declarations
/// in flight, current turn plays) belongs to the active phase, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub hand: Vec<Piece>,
    pub score_total: i32,
}

impl PlayerState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Vec::new(),
            score_total: 0,
        }
    }
}

/// Committed per-round facts, produced by phases as they exit. Reset on
/// every round start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    /// Seat that declares first and leads the first turn.
    pub starter: Seat,
    /// Multiplier applied to round scores; grows with each redeal.
    pub redeal_multiplier: f64,
    /// Redeals executed this round.
    pub redeal_count: u32,
    /// Complete declaration set, committed when the declaration phase ends.
    pub declarations: Option<DeclarationSet>,
    /// Piles won per seat this round.
    pub piles_won: [u8; PLAYERS],
    /// Resolved turns this round, in order.
    pub turn_results: Vec<TurnResult>,
}

impl RoundState {
    pub fn empty(starter: Seat) -> Self {
        Self {
            starter,
            redeal_multiplier: 1.0,
            redeal_count: 0,
            declarations: None,
            piles_won: [0; PLAYERS],
            turn_results: Vec::new(),
        }
    }
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase of the game.
    pub phase: GamePhase,
    /// Round number, 1-based; 0 before the first round is dealt.
    pub round_no: u32,
    /// Players in fixed seat order.
    pub players: Vec<PlayerState>,
    /// Per-round container.
    pub round: RoundState,
    /// Winner of the most recently scored round, if any.
    pub last_round_winner: Option<Seat>,
}

impl GameState {
    pub fn new(player_names: Vec<String>) -> Self {
        Self {
            phase: GamePhase::Waiting,
            round_no: 0,
            players: player_names.into_iter().map(PlayerState::new).collect(),
            round: RoundState::empty(0),
            last_round_winner: None,
        }
    }

    pub fn seat_of(&self, player: &str) -> Option<Seat> {
        self.players.iter().position(|p| p.name == player)
    }

    pub fn name_of(&self, seat: Seat) -> &str {
        &self.players[seat].name
    }

    pub fn scores_total(&self) -> Vec<i32> {
        self.players.iter().map(|p| p.score_total).collect()
    }
}

/// Seat / turn math helpers (4 fixed seats: 0..=3).
///
/// Shared by every phase so rotation and "who acts next" have a single
/// source of truth.
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    (seat + 1) % PLAYERS
}

/// Full table rotation beginning at `start`.
pub fn rotation_from(start: Seat) -> [Seat; PLAYERS] {
    let mut order = [0; PLAYERS];
    for (i, slot) in order.iter_mut().enumerate() {
        *slot = (start + i) % PLAYERS;
    }
    order
}

pub fn require_declarations<'a>(
    state: &'a GameState,
    ctx: &'static str,
) -> Result<&'a DeclarationSet, DomainError> {
    state.round.declarations.as_ref().ok_or_else(|| {
        DomainError::internal(format!("declarations must be committed ({ctx})"))
    })
}
