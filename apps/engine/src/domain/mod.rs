//! Domain layer: pure game logic types and helpers.

pub mod dealing;
pub mod declaration;
pub mod pieces_parsing;
pub mod pieces_serde;
pub mod pieces_types;
pub mod plays;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;
pub mod turn_resolution;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_dealing;
#[cfg(test)]
mod tests_plays;
#[cfg(test)]
mod tests_props_plays;
#[cfg(test)]
mod tests_props_turn_winner;
#[cfg(test)]
mod tests_turn_resolution;

// Re-exports for ergonomics
pub use dealing::{deal_hands, general_red_holder, is_weak_hand};
pub use declaration::{Declaration, DeclarationSet};
pub use pieces_parsing::{from_stored_format, try_parse_pieces};
pub use pieces_types::{Piece, PieceColor, PieceKind, FULL_SET};
pub use plays::{classify, PlayKind, TurnPlay};
pub use rules::{valid_declaration_range, HAND_SIZE, PLAYERS};
pub use scoring::{
    calculate_base_score, calculate_final_standings, calculate_round_scores, get_penalty_reason,
    PlayerStanding, RoundResult, RoundScore,
};
pub use seed_derivation::derive_dealing_seed;
pub use snapshot::{GameSnapshot, PhaseSnapshot, PlayerView};
pub use state::{GamePhase, GameState, PlayerState, RoundState, Seat};
pub use turn_resolution::{
    calculate_turn_statistics, resolve_turn, validate_turn_plays, TurnResult, TurnStatistics,
};
