//! The bot/AI boundary.
//!
//! The engine only requires that *something* can turn a player's view of
//! the game into their next action; how that decision is made lives
//! entirely outside the core.

use async_trait::async_trait;

use crate::domain::snapshot::PlayerView;
use crate::engine::action::GameAction;

/// Produces the next action for one player given their current view.
///
/// Returning `None` means the producer has nothing to do for this view
/// (not their turn, phase accepts no input from them, or the game is
/// over).
#[async_trait]
pub trait ActionProducer: Send {
    async fn next_action(&mut self, view: &PlayerView) -> Option<GameAction>;
}
