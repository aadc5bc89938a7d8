#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;

// Re-exports for public API
pub use config::game::GameConfig;
pub use domain::snapshot::{GameSnapshot, PlayerView};
pub use domain::state::{GamePhase, GameState};
pub use engine::action::{ActionPayload, GameAction};
pub use engine::events::{ChannelSink, EventSink, GameEvent, NullSink, VecSink};
pub use engine::game::{spawn, ActionOutcome, Disposition, Game, GameHandle, GameId};
pub use engine::producer::ActionProducer;
pub use engine::queue::ActionQueue;
pub use errors::domain::DomainError;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
