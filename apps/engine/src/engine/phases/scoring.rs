//! Scoring phase: apply the scoring engine to the finished round and
//! decide whether the game continues.

use tracing::info;

use super::PhaseContext;
use crate::config::game::GameConfig;
use crate::domain::scoring::{calculate_round_scores, RoundResult};
use crate::domain::state::{require_declarations, GamePhase, GameState};
use crate::engine::events::GameEvent;
use crate::errors::domain::DomainError;

pub struct ScoringPhase {
    /// Kept for snapshots; totals are already applied on entry.
    pub(crate) result: Option<RoundResult>,
}

impl ScoringPhase {
    pub fn new() -> Self {
        Self { result: None }
    }

    /// Compute the round result and fold the deltas into the persistent
    /// totals. Scoring is the only writer of `score_total`.
    pub fn on_enter(&mut self, ctx: &mut PhaseContext<'_>) -> Result<(), DomainError> {
        let declarations = require_declarations(ctx.state, "scoring")?.clone();
        let state = &mut *ctx.state;
        let result = calculate_round_scores(
            &declarations,
            |player| {
                state
                    .seat_of(player)
                    .map(|seat| state.round.piles_won[seat])
                    .unwrap_or(0)
            },
            state.round.redeal_multiplier,
            state.round_no,
        );

        for score in &result.scores {
            let seat = state.seat_of(&score.player).ok_or_else(|| {
                DomainError::internal("scored player is not seated")
            })?;
            state.players[seat].score_total += score.final_score;
        }
        state.last_round_winner = result
            .winner
            .as_deref()
            .and_then(|name| state.seat_of(name));

        info!(
            round_no = state.round_no,
            winner = ?result.winner,
            multiplier = result.redeal_multiplier,
            "Round scored"
        );
        ctx.publish(GameEvent::RoundScored {
            result: result.clone(),
        });
        self.result = Some(result);
        Ok(())
    }

    pub fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    /// Next round, unless a game-end condition holds.
    pub fn check_transition(&self, state: &GameState, config: &GameConfig) -> Option<GamePhase> {
        let target_reached = state
            .players
            .iter()
            .any(|p| p.score_total >= config.win_score);
        if target_reached || state.round_no >= config.max_rounds {
            Some(GamePhase::GameOver)
        } else {
            Some(GamePhase::Preparation)
        }
    }
}

impl Default for ScoringPhase {
    fn default() -> Self {
        Self::new()
    }
}
