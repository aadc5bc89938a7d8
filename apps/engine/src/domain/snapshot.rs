//! Public snapshot types for observing game state without exposing
//! other players' hands.
//!
//! The engine builds these (`engine::game::Game::snapshot`); external
//! persistence or transport layers consume them as plain serializable
//! data.

use serde::{Deserialize, Serialize};

use crate::domain::pieces_types::Piece;
use crate::domain::scoring::{PlayerStanding, RoundResult};
use crate::domain::state::{GamePhase, GameState, Seat};

/// Public info about a single seat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeatPublic {
    pub seat: Seat,
    pub name: String,
    pub piece_count: usize,
    pub declared: Option<u8>,
    pub piles_won: u8,
    pub score_total: i32,
}

/// Game-level header present in all snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameHeader {
    pub round_no: u32,
    pub phase: GamePhase,
    pub seating: Vec<SeatPublic>,
    pub redeal_multiplier: f64,
}

/// Top-level snapshot combining header and phase-specific data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game: GameHeader,
    pub phase: PhaseSnapshot,
}

/// Adjacently tagged union of phase-specific snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "data")]
pub enum PhaseSnapshot {
    Waiting,
    Preparation(PreparationSnapshot),
    Declaration(DeclarationSnapshot),
    Turn(TurnSnapshot),
    Scoring(ScoringSnapshot),
    GameOver(GameOverSnapshot),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreparationSnapshot {
    pub weak_seats: Vec<Seat>,
    /// Seats still owed a redeal decision, in voting order.
    pub awaiting_redeal: Vec<Seat>,
    pub redeal_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeclarationSnapshot {
    pub order: Vec<Seat>,
    pub to_act: Option<Seat>,
    /// Declared values by seat; None until that seat declares.
    pub declared: Vec<Option<u8>>,
    /// Value the declarer to act may not choose, if any (it would make
    /// the set total the forbidden sum).
    pub forbidden_value: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub turn_no: u32,
    pub starter: Seat,
    pub to_act: Option<Seat>,
    pub required_piece_count: Option<usize>,
    /// Plays already on the table this turn; pieces are public once played.
    pub plays: Vec<(Seat, Vec<Piece>)>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringSnapshot {
    pub result: RoundResult,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameOverSnapshot {
    pub winner: Option<String>,
    pub standings: Vec<PlayerStanding>,
}

/// Build the header shared by all snapshots.
pub fn build_header(state: &GameState) -> GameHeader {
    let seating = state
        .players
        .iter()
        .enumerate()
        .map(|(seat, p)| SeatPublic {
            seat,
            name: p.name.clone(),
            piece_count: p.hand.len(),
            declared: state
                .round
                .declarations
                .as_ref()
                .and_then(|d| d.declared_for(&p.name)),
            piles_won: state.round.piles_won[seat],
            score_total: p.score_total,
        })
        .collect();

    GameHeader {
        round_no: state.round_no,
        phase: state.phase,
        seating,
        redeal_multiplier: state.round.redeal_multiplier,
    }
}

/// A single player's private view: the public snapshot plus their own
/// hand. This is the whole contract the bot boundary needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub seat: Seat,
    pub name: String,
    pub hand: Vec<Piece>,
    pub snapshot: GameSnapshot,
}
