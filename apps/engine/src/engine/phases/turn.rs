//! Turn phase: the starter leads and fixes the required piece count;
//! everyone else follows in order. One pile per resolved turn.

use tracing::{debug, info};

use super::{ActionResult, PhaseContext};
use crate::domain::pieces_types::Piece;
use crate::domain::plays::TurnPlay;
use crate::domain::state::{rotation_from, GamePhase, GameState, Seat};
use crate::domain::turn_resolution::resolve_turn;
use crate::engine::action::{ActionPayload, GameAction};
use crate::engine::events::GameEvent;
use crate::errors::domain::DomainError;

pub struct TurnPhase {
    /// 1-based turn number within the round.
    pub(crate) turn_no: u32,
    /// Seat leading the current turn.
    pub(crate) starter: Seat,
    /// Seats acting this turn, starter first; seats with empty hands
    /// are skipped.
    pub(crate) order: Vec<Seat>,
    /// Index into `order` of the seat expected to play next.
    pub(crate) current: usize,
    /// Piece count fixed by the starter's play.
    pub(crate) required: Option<usize>,
    /// Plays so far this turn, in play order.
    pub(crate) plays: Vec<(Seat, TurnPlay)>,
    /// Set once every hand is empty after a resolved turn.
    pub(crate) round_complete: bool,
}

impl TurnPhase {
    pub fn new() -> Self {
        Self {
            turn_no: 0,
            starter: 0,
            order: Vec::new(),
            current: 0,
            required: None,
            plays: Vec::new(),
            round_complete: false,
        }
    }

    pub fn on_enter(&mut self, ctx: &mut PhaseContext<'_>) -> Result<(), DomainError> {
        self.starter = ctx.state.round.starter;
        self.turn_no = 1;
        self.begin_turn(ctx.state)?;
        info!(
            round_no = ctx.state.round_no,
            starter = self.starter,
            "Turn phase started"
        );
        Ok(())
    }

    /// Reset per-turn working data for a new turn led by `self.starter`.
    fn begin_turn(&mut self, state: &GameState) -> Result<(), DomainError> {
        self.order = rotation_from(self.starter)
            .into_iter()
            .filter(|&seat| !state.players[seat].hand.is_empty())
            .collect();
        if self.order.is_empty() {
            return Err(DomainError::internal(
                "turn started with every hand empty",
            ));
        }
        self.current = 0;
        self.required = None;
        self.plays.clear();
        Ok(())
    }

    pub fn to_act(&self) -> Option<Seat> {
        self.order.get(self.current).copied()
    }

    pub fn required_piece_count(&self) -> Option<usize> {
        self.required
    }

    pub fn validate_action(&self, state: &GameState, action: &GameAction) -> Result<(), String> {
        let ActionPayload::PlayPieces { pieces } = &action.payload else {
            return Err("only piece plays are accepted during the turn phase".to_string());
        };
        let seat = state
            .seat_of(&action.player)
            .ok_or_else(|| format!("unknown player {}", action.player))?;
        let Some(expected) = self.to_act() else {
            return Err("turn is already complete".to_string());
        };
        if seat != expected {
            return Err(format!(
                "not your turn to play; waiting for {}",
                state.name_of(expected)
            ));
        }
        if pieces.is_empty() {
            return Err("must play at least one piece".to_string());
        }
        if !hand_contains(&state.players[seat].hand, pieces) {
            return Err("play includes pieces not in your hand".to_string());
        }
        // A count differing from the starter's is accepted here: the
        // play is recorded but resolution excludes it from winning.
        Ok(())
    }

    pub fn handle_action(
        &mut self,
        ctx: &mut PhaseContext<'_>,
        action: &GameAction,
    ) -> Result<Option<ActionResult>, DomainError> {
        if self.validate_action(ctx.state, action).is_err() {
            return Ok(None);
        }
        let ActionPayload::PlayPieces { pieces } = &action.payload else {
            return Ok(None);
        };
        let seat = ctx
            .state
            .seat_of(&action.player)
            .ok_or_else(|| DomainError::internal("validated player vanished"))?;

        remove_from_hand(&mut ctx.state.players[seat].hand, pieces)?;
        let play = TurnPlay::new(action.player.clone(), pieces.clone())?;

        if self.current == 0 {
            self.required = Some(play.piece_count());
        }
        let piece_count = play.piece_count();
        self.plays.push((seat, play));
        self.current += 1;

        let turn_complete = self.current == self.order.len();
        let next_player = self
            .to_act()
            .map(|s| ctx.state.name_of(s).to_string());
        debug!(
            player = %action.player,
            pieces = piece_count,
            turn_no = self.turn_no,
            "Play recorded"
        );
        ctx.publish(GameEvent::PlayRecorded {
            player: action.player.clone(),
            piece_count,
            next_player,
        });

        if turn_complete {
            self.resolve_current_turn(ctx)?;
        }

        Ok(Some(ActionResult::PlayRecorded {
            player: action.player.clone(),
            piece_count,
            turn_complete,
        }))
    }

    /// Resolve the completed turn, award the pile, and set up the next
    /// turn or mark the round complete.
    fn resolve_current_turn(&mut self, ctx: &mut PhaseContext<'_>) -> Result<(), DomainError> {
        let plays: Vec<TurnPlay> = self.plays.iter().map(|(_, p)| p.clone()).collect();
        let result = resolve_turn(&plays, self.turn_no, self.required);

        if let Some(winner) = &result.winner {
            let winner_seat = ctx
                .state
                .seat_of(winner)
                .ok_or_else(|| DomainError::internal("turn winner is not seated"))?;
            ctx.state.round.piles_won[winner_seat] += 1;
            // Winner leads the next turn; on a no-winner turn the
            // starter is unchanged.
            self.starter = winner_seat;
        }

        info!(
            turn_no = self.turn_no,
            winner = ?result.winner,
            pile_awarded = result.pile_awarded,
            "Turn resolved"
        );
        ctx.state.round.turn_results.push(result.clone());
        ctx.publish(GameEvent::TurnResolved { result });

        if ctx.state.players.iter().all(|p| p.hand.is_empty()) {
            self.round_complete = true;
            return Ok(());
        }

        self.turn_no += 1;
        self.begin_turn(ctx.state)
    }

    pub fn check_transition(&self) -> Option<GamePhase> {
        if self.round_complete {
            Some(GamePhase::Scoring)
        } else {
            None
        }
    }
}

impl Default for TurnPhase {
    fn default() -> Self {
        Self::new()
    }
}

/// Multiset containment: every requested piece is present in the hand,
/// counting duplicates.
fn hand_contains(hand: &[Piece], pieces: &[Piece]) -> bool {
    let mut remaining = hand.to_vec();
    for piece in pieces {
        match remaining.iter().position(|p| p == piece) {
            Some(i) => {
                remaining.swap_remove(i);
            }
            None => return false,
        }
    }
    true
}

/// Remove the played pieces from the hand, one occurrence each.
fn remove_from_hand(hand: &mut Vec<Piece>, pieces: &[Piece]) -> Result<(), DomainError> {
    for piece in pieces {
        let i = hand
            .iter()
            .position(|p| p == piece)
            .ok_or_else(|| DomainError::internal("validated play not in hand"))?;
        hand.remove(i);
    }
    Ok(())
}
