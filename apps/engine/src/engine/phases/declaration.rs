//! Declaration phase: each player declares a pile count in strict turn
//! order.

use tracing::{debug, info};

use super::{ActionResult, PhaseContext};
use crate::domain::declaration::{Declaration, DeclarationSet};
use crate::domain::rules::{valid_declaration_range, FORBIDDEN_DECLARATION_TOTAL, PLAYERS};
use crate::domain::state::{rotation_from, GamePhase, GameState, Seat};
use crate::engine::action::{ActionPayload, GameAction};
use crate::engine::events::GameEvent;
use crate::errors::domain::DomainError;

pub struct DeclarationPhase {
    /// Declaration order, starter first.
    pub(crate) order: [Seat; PLAYERS],
    /// Index into `order` of the player expected to declare next.
    pub(crate) current: usize,
    /// Declarations accepted so far, in order.
    pub(crate) recorded: Vec<Declaration>,
}

impl DeclarationPhase {
    pub fn new() -> Self {
        Self {
            order: [0; PLAYERS],
            current: 0,
            recorded: Vec::with_capacity(PLAYERS),
        }
    }

    pub fn on_enter(&mut self, ctx: &mut PhaseContext<'_>) -> Result<(), DomainError> {
        self.order = rotation_from(ctx.state.round.starter);
        self.current = 0;
        info!(
            round_no = ctx.state.round_no,
            starter = ctx.state.round.starter,
            "Declaration phase started"
        );
        Ok(())
    }

    /// Seat expected to declare next, if declarations remain open.
    pub fn to_act(&self) -> Option<Seat> {
        self.order.get(self.current).copied()
    }

    /// The one value the declarer to act may not choose: the value that
    /// would complete the set at the forbidden total. Only the final
    /// declarer ever has one.
    pub fn forbidden_value(&self) -> Option<u8> {
        if self.current + 1 != PLAYERS {
            return None;
        }
        let sum: u8 = self.recorded.iter().map(Declaration::pile_count).sum();
        FORBIDDEN_DECLARATION_TOTAL.checked_sub(sum)
    }

    pub fn validate_action(&self, state: &GameState, action: &GameAction) -> Result<(), String> {
        let &ActionPayload::Declare { count, .. } = &action.payload else {
            return Err("only declarations are accepted during the declaration phase".to_string());
        };
        let seat = state
            .seat_of(&action.player)
            .ok_or_else(|| format!("unknown player {}", action.player))?;
        let Some(expected) = self.to_act() else {
            return Err("all declarations are already recorded".to_string());
        };
        if seat != expected {
            return Err(format!(
                "not your turn to declare; waiting for {}",
                state.name_of(expected)
            ));
        }
        if !valid_declaration_range().contains(&count) {
            return Err(format!(
                "declaration must be in {:?}",
                valid_declaration_range()
            ));
        }
        if self.forbidden_value() == Some(count) {
            return Err(format!(
                "declaring {count} would make the round total exactly {FORBIDDEN_DECLARATION_TOTAL}"
            ));
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
        let &ActionPayload::Declare { count, forced } = &action.payload else {
            return Ok(None);
        };

        let declaration = Declaration::with_forced(action.player.clone(), count, forced)?;
        self.recorded.push(declaration);
        self.current += 1;

        let next_player = self
            .to_act()
            .map(|seat| ctx.state.name_of(seat).to_string());
        debug!(
            player = %action.player,
            value = count,
            forced,
            "Declaration recorded"
        );
        ctx.publish(GameEvent::DeclarationRecorded {
            player: action.player.clone(),
            value: count,
            is_forced: forced,
            next_player: next_player.clone(),
        });

        Ok(Some(ActionResult::DeclarationRecorded {
            player: action.player.clone(),
            value: count,
            next_player,
        }))
    }

    pub fn check_transition(&self) -> Option<GamePhase> {
        if self.recorded.len() == PLAYERS {
            Some(GamePhase::Turn)
        } else {
            None
        }
    }

    /// Commit the completed set. Validation rejected any final value
    /// that would break the set invariants, so failure here is a bug in
    /// this phase, not bad input.
    pub fn on_exit(&mut self, ctx: &mut PhaseContext<'_>) -> Result<(), DomainError> {
        let set = DeclarationSet::new(std::mem::take(&mut self.recorded)).map_err(|e| {
            DomainError::internal(format!("declaration phase built an invalid set: {e}"))
        })?;
        info!(total = set.total(), "Declarations committed");
        ctx.state.round.declarations = Some(set);
        Ok(())
    }
}

impl Default for DeclarationPhase {
    fn default() -> Self {
        Self::new()
    }
}
