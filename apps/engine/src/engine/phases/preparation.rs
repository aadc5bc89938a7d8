//! Preparation phase: deal hands, resolve weak-hand redeal votes.

use tracing::{debug, info};

use super::{ActionResult, PhaseContext};
use crate::domain::dealing::{deal_hands, general_red_holder, is_weak_hand};
use crate::domain::rules::PLAYERS;
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::domain::state::{GameState, RoundState, Seat};
use crate::engine::action::{ActionKind, ActionPayload, GameAction};
use crate::engine::events::GameEvent;
use crate::errors::domain::DomainError;

pub struct PreparationPhase {
    /// Seats dealt a weak hand in the current deal.
    pub(crate) weak_seats: Vec<Seat>,
    /// Weak seats still owed a redeal decision, in seat order.
    pub(crate) awaiting: Vec<Seat>,
}

impl PreparationPhase {
    pub fn new() -> Self {
        Self {
            weak_seats: Vec::new(),
            awaiting: Vec::new(),
        }
    }

    /// Start a fresh round: bump the round number, reset per-round
    /// state, and run the initial deal.
    pub fn on_enter(&mut self, ctx: &mut PhaseContext<'_>) -> Result<(), DomainError> {
        ctx.state.round_no += 1;
        ctx.state.round = RoundState::empty(0);
        info!(round_no = ctx.state.round_no, "Preparing round");
        self.deal(ctx, None)
    }

    /// Deal (or redeal) hands and refresh weak-hand bookkeeping.
    ///
    /// Starter selection: the redeal accepter when this deal is a
    /// redeal; otherwise the previous round's winner; otherwise (first
    /// round) the holder of the red general.
    fn deal(&mut self, ctx: &mut PhaseContext<'_>, accepter: Option<Seat>) -> Result<(), DomainError> {
        let seed = derive_dealing_seed(
            ctx.game_seed,
            ctx.state.round_no,
            ctx.state.round.redeal_count,
        );
        let hands = deal_hands(PLAYERS, seed)?;

        let threshold = ctx.config.weak_hand_threshold;
        self.weak_seats = hands
            .iter()
            .enumerate()
            .filter(|(_, hand)| is_weak_hand(hand, threshold))
            .map(|(seat, _)| seat)
            .collect();

        let voting_open = ctx.state.round.redeal_count < ctx.config.max_redeals_per_round;
        self.awaiting = if voting_open {
            self.weak_seats.clone()
        } else {
            Vec::new()
        };

        let starter = match accepter {
            Some(seat) => seat,
            None => match ctx.state.last_round_winner {
                Some(seat) => seat,
                None => general_red_holder(&hands).ok_or_else(|| {
                    DomainError::internal("complete deal is missing the red general")
                })?,
            },
        };
        ctx.state.round.starter = starter;

        for (seat, hand) in hands.into_iter().enumerate() {
            ctx.state.players[seat].hand = hand;
        }

        let weak_players: Vec<String> = self
            .weak_seats
            .iter()
            .map(|&seat| ctx.state.name_of(seat).to_string())
            .collect();
        debug!(
            round_no = ctx.state.round_no,
            starter,
            weak = weak_players.len(),
            "Hands dealt"
        );
        ctx.publish(GameEvent::HandsDealt {
            round_no: ctx.state.round_no,
            weak_players,
            redeal_multiplier: ctx.state.round.redeal_multiplier,
        });
        Ok(())
    }

    pub fn validate_action(&self, state: &GameState, action: &GameAction) -> Result<(), String> {
        if action.kind() != ActionKind::RedealResponse {
            return Err("only redeal responses are accepted during preparation".to_string());
        }
        let seat = state
            .seat_of(&action.player)
            .ok_or_else(|| format!("unknown player {}", action.player))?;
        if !self.awaiting.contains(&seat) {
            return Err("no redeal decision is expected from you".to_string());
        }
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
        let &ActionPayload::RedealResponse { accept } = &action.payload else {
            return Ok(None);
        };
        let seat = ctx
            .state
            .seat_of(&action.player)
            .ok_or_else(|| DomainError::internal("validated player vanished"))?;

        ctx.publish(GameEvent::RedealDecisionRecorded {
            player: action.player.clone(),
            accepted: accept,
        });

        if accept {
            ctx.state.round.redeal_count += 1;
            ctx.state.round.redeal_multiplier += ctx.config.redeal_multiplier_step;
            info!(
                player = %action.player,
                redeal_count = ctx.state.round.redeal_count,
                multiplier = ctx.state.round.redeal_multiplier,
                "Redeal accepted"
            );
            ctx.publish(GameEvent::RedealExecuted {
                requested_by: action.player.clone(),
                redeal_multiplier: ctx.state.round.redeal_multiplier,
            });
            self.deal(ctx, Some(seat))?;
        } else {
            self.awaiting.retain(|&s| s != seat);
            debug!(player = %action.player, "Redeal declined");
        }

        Ok(Some(ActionResult::RedealDecisionRecorded {
            player: action.player.clone(),
            accepted: accept,
            redeal_executed: accept,
        }))
    }

    pub fn check_transition(&self) -> Option<crate::domain::state::GamePhase> {
        if self.awaiting.is_empty() {
            Some(crate::domain::state::GamePhase::Declaration)
        } else {
            None
        }
    }
}

impl Default for PreparationPhase {
    fn default() -> Self {
        Self::new()
    }
}
