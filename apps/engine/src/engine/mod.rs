//! Orchestration layer: actions in, events out, one task per game.

pub mod action;
pub mod events;
pub mod game;
pub mod phases;
pub mod producer;
pub mod queue;


pub use action::{ActionKind, ActionPayload, GameAction};
pub use events::{ChannelSink, EventSink, GameEvent, NullSink, VecSink};
pub use game::{spawn, ActionOutcome, Disposition, Game, GameHandle, GameId};
pub use phases::{ActionResult, PhaseState};
pub use producer::ActionProducer;
pub use queue::ActionQueue;
