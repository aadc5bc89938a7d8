//! Phase state machine.
//!
//! Each phase is a struct owning its working data, created on entry and
//! dropped on exit; results that must outlive a phase are committed into
//! `GameState.round` during `on_exit`/resolution, never shared while in
//! flight. Dispatch is a closed enum matched exhaustively, so a new
//! phase is a compile-enforced change everywhere it matters.

pub mod declaration;
pub mod preparation;
pub mod scoring;
pub mod turn;

use serde::Serialize;

use crate::config::game::GameConfig;
use crate::domain::state::{GamePhase, GameState};
use crate::engine::action::GameAction;
use crate::engine::events::{EventSink, GameEvent};
use crate::errors::domain::DomainError;

pub use declaration::DeclarationPhase;
pub use preparation::PreparationPhase;
pub use scoring::ScoringPhase;
pub use turn::TurnPhase;

/// Everything a phase may touch while acting. Dependencies arrive here
/// explicitly; phases hold no ambient references.
pub struct PhaseContext<'a> {
    pub state: &'a mut GameState,
    pub config: &'a GameConfig,
    pub events: &'a dyn EventSink,
    pub game_seed: i64,
}

impl PhaseContext<'_> {
    pub(crate) fn publish(&self, event: GameEvent) {
        self.events.publish(event);
    }
}

/// Outcome data for one accepted action, returned to the caller that
/// submitted it (events carry the same facts to everyone else).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionResult {
    DeclarationRecorded {
        player: String,
        value: u8,
        next_player: Option<String>,
    },
    RedealDecisionRecorded {
        player: String,
        accepted: bool,
        redeal_executed: bool,
    },
    PlayRecorded {
        player: String,
        piece_count: usize,
        turn_complete: bool,
    },
}

/// The active phase with its working data.
pub enum PhaseState {
    Waiting,
    Preparation(PreparationPhase),
    Declaration(DeclarationPhase),
    Turn(TurnPhase),
    Scoring(ScoringPhase),
    GameOver,
}

impl PhaseState {
    pub fn phase(&self) -> GamePhase {
        match self {
            PhaseState::Waiting => GamePhase::Waiting,
            PhaseState::Preparation(_) => GamePhase::Preparation,
            PhaseState::Declaration(_) => GamePhase::Declaration,
            PhaseState::Turn(_) => GamePhase::Turn,
            PhaseState::Scoring(_) => GamePhase::Scoring,
            PhaseState::GameOver => GamePhase::GameOver,
        }
    }

    /// Construct the phase for `phase`, run its `on_enter`, and mirror
    /// the phase name into the shared state.
    pub fn enter(phase: GamePhase, ctx: &mut PhaseContext<'_>) -> Result<Self, DomainError> {
        ctx.state.phase = phase;
        let entered = match phase {
            GamePhase::Waiting => PhaseState::Waiting,
            GamePhase::Preparation => {
                let mut p = PreparationPhase::new();
                p.on_enter(ctx)?;
                PhaseState::Preparation(p)
            }
            GamePhase::Declaration => {
                let mut p = DeclarationPhase::new();
                p.on_enter(ctx)?;
                PhaseState::Declaration(p)
            }
            GamePhase::Turn => {
                let mut p = TurnPhase::new();
                p.on_enter(ctx)?;
                PhaseState::Turn(p)
            }
            GamePhase::Scoring => {
                let mut p = ScoringPhase::new();
                p.on_enter(ctx)?;
                PhaseState::Scoring(p)
            }
            GamePhase::GameOver => {
                let standings = crate::domain::scoring::calculate_final_standings(
                    &ctx.state
                        .players
                        .iter()
                        .map(|p| (p.name.clone(), p.score_total))
                        .collect::<Vec<_>>(),
                );
                ctx.publish(GameEvent::GameOver {
                    winner: standings.first().map(|s| s.player.clone()),
                    standings,
                });
                PhaseState::GameOver
            }
        };
        ctx.publish(GameEvent::PhaseChanged {
            phase,
            round_no: ctx.state.round_no,
        });
        Ok(entered)
    }

    /// Pure check: would this action be accepted right now? `Err` carries
    /// the human-readable rejection reason. Never mutates anything.
    pub fn validate_action(&self, state: &GameState, action: &GameAction) -> Result<(), String> {
        match self {
            PhaseState::Waiting => Err("game has not started".to_string()),
            PhaseState::Preparation(p) => p.validate_action(state, action),
            PhaseState::Declaration(p) => p.validate_action(state, action),
            PhaseState::Turn(p) => p.validate_action(state, action),
            PhaseState::Scoring(_) => Err("scoring accepts no player actions".to_string()),
            PhaseState::GameOver => Err("game is over".to_string()),
        }
    }

    /// Apply an action. `Ok(None)` means rejected: the action had no
    /// effect and phase data is untouched. `Err` is an internal
    /// invariant failure, fatal to the game instance.
    pub fn handle_action(
        &mut self,
        ctx: &mut PhaseContext<'_>,
        action: &GameAction,
    ) -> Result<Option<ActionResult>, DomainError> {
        match self {
            PhaseState::Waiting | PhaseState::GameOver => Ok(None),
            PhaseState::Preparation(p) => p.handle_action(ctx, action),
            PhaseState::Declaration(p) => p.handle_action(ctx, action),
            PhaseState::Turn(p) => p.handle_action(ctx, action),
            PhaseState::Scoring(_) => Ok(None),
        }
    }

    /// Next phase, if this phase's exit conditions hold.
    pub fn check_transition(&self, state: &GameState, config: &GameConfig) -> Option<GamePhase> {
        match self {
            PhaseState::Waiting => None,
            PhaseState::Preparation(p) => p.check_transition(),
            PhaseState::Declaration(p) => p.check_transition(),
            PhaseState::Turn(p) => p.check_transition(),
            PhaseState::Scoring(p) => p.check_transition(state, config),
            PhaseState::GameOver => None,
        }
    }

    /// Commit whatever outlives the phase; working data is dropped with
    /// the phase value itself.
    pub fn on_exit(&mut self, ctx: &mut PhaseContext<'_>) -> Result<(), DomainError> {
        match self {
            PhaseState::Declaration(p) => p.on_exit(ctx),
            PhaseState::Waiting
            | PhaseState::Preparation(_)
            | PhaseState::Turn(_)
            | PhaseState::Scoring(_)
            | PhaseState::GameOver => Ok(()),
        }
    }
}
