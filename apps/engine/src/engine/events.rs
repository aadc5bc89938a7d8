//! Outbound game events.
//!
//! The engine publishes domain results through an [`EventSink`] it is
//! handed at construction; it never calls a transport directly. Sinks
//! must be cheap and non-blocking: publishing happens inside the game
//! task.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::domain::scoring::{PlayerStanding, RoundResult};
use crate::domain::state::GamePhase;
use crate::domain::turn_resolution::TurnResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PhaseChanged {
        phase: GamePhase,
        round_no: u32,
    },
    HandsDealt {
        round_no: u32,
        weak_players: Vec<String>,
        redeal_multiplier: f64,
    },
    RedealDecisionRecorded {
        player: String,
        accepted: bool,
    },
    RedealExecuted {
        requested_by: String,
        redeal_multiplier: f64,
    },
    DeclarationRecorded {
        player: String,
        value: u8,
        is_forced: bool,
        next_player: Option<String>,
    },
    PlayRecorded {
        player: String,
        piece_count: usize,
        next_player: Option<String>,
    },
    TurnResolved {
        result: TurnResult,
    },
    RoundScored {
        result: RoundResult,
    },
    GameOver {
        winner: Option<String>,
        standings: Vec<PlayerStanding>,
    },
}

/// Abstract outbound sink. The dependency direction is engine -> sink;
/// concrete transports implement this on their side of the boundary.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: GameEvent);
}

/// Sink that drops everything. Useful for headless simulation.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, _event: GameEvent) {}
}

/// Sink backed by an unbounded tokio channel. A closed receiver is not
/// an engine error; late events are simply dropped.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn publish(&self, event: GameEvent) {
        let _ = self.tx.send(event);
    }
}

/// Sink that records everything in memory, for tests and the simulator.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Mutex<Vec<GameEvent>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn snapshot_events(&self) -> Vec<GameEvent> {
        self.events.lock().clone()
    }
}

impl EventSink for VecSink {
    fn publish(&self, event: GameEvent) {
        self.events.lock().push(event);
    }
}
