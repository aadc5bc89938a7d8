//! One game instance: state, active phase, action queue, event sink.
//!
//! A `Game` is single-owner: exactly one task mutates it, so phase data
//! is never touched concurrently. `GameHandle` is the concurrent front
//! door — it forwards commands over a channel to the owning task
//! (spawned with [`spawn`]), which is the natural one-task-per-game
//! mapping. Independent games share nothing mutable and run fully in
//! parallel.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::config::game::GameConfig;
use crate::domain::rules::PLAYERS;
use crate::domain::snapshot::{
    build_header, DeclarationSnapshot, GameOverSnapshot, GameSnapshot, PhaseSnapshot, PlayerView,
    PreparationSnapshot, ScoringSnapshot, TurnSnapshot,
};
use crate::domain::state::{GamePhase, GameState, Seat};
use crate::engine::action::GameAction;
use crate::engine::events::EventSink;
use crate::engine::phases::{ActionResult, PhaseContext, PhaseState};
use crate::engine::queue::ActionQueue;
use crate::errors::domain::{DomainError, ValidationKind};

/// Transition-loop backstop. A legal chain never comes close; hitting
/// it means a phase keeps scheduling itself and the instance is broken.
const MAX_CHAINED_TRANSITIONS: usize = 8;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GameId(Uuid);

impl GameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Disposition of one processed action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Disposition {
    Accepted { result: ActionResult },
    Rejected { reason: String },
}

/// What happened to one queued action, in processing order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub seq: u64,
    pub player: String,
    pub disposition: Disposition,
}

impl ActionOutcome {
    pub fn accepted(&self) -> bool {
        matches!(self.disposition, Disposition::Accepted { .. })
    }
}

pub struct Game {
    id: GameId,
    config: GameConfig,
    seed: i64,
    state: GameState,
    phase: PhaseState,
    queue: ActionQueue,
    events: Arc<dyn EventSink>,
}

impl Game {
    /// Build a game in the Waiting phase. `seed` fixes every deal of
    /// the game; pass `None` for a random one.
    pub fn new(
        id: GameId,
        player_names: Vec<String>,
        config: GameConfig,
        seed: Option<i64>,
        events: Arc<dyn EventSink>,
    ) -> Result<Self, DomainError> {
        if player_names.len() != PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::InvalidPlayerCount,
                format!("Game requires exactly {PLAYERS} players"),
            ));
        }
        for (i, name) in player_names.iter().enumerate() {
            if name.is_empty() {
                return Err(DomainError::validation(
                    ValidationKind::EmptyPlayerName,
                    "Player names must not be empty",
                ));
            }
            if player_names[..i].contains(name) {
                return Err(DomainError::validation(
                    ValidationKind::DuplicatePlayer,
                    format!("Duplicate player name {name}"),
                ));
            }
        }
        let seed = seed.unwrap_or_else(rand::random::<i64>);
        info!(game_id = %id, seed, "Game created");
        Ok(Self {
            id,
            config,
            seed,
            state: GameState::new(player_names),
            phase: PhaseState::Waiting,
            queue: ActionQueue::new(),
            events,
        })
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn phase(&self) -> GamePhase {
        self.phase.phase()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Buffer an action for processing. Concurrency-safe; the sequence
    /// number returned fixes its processing position.
    pub fn submit_action(&self, action: GameAction) -> u64 {
        self.queue.add_action(action)
    }

    /// Leave Waiting and run the opening transitions (deal, possibly
    /// straight into declarations when nobody is weak-handed).
    pub fn start(&mut self) -> Result<(), DomainError> {
        if self.phase.phase() != GamePhase::Waiting {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Game already started",
            ));
        }
        info!(game_id = %self.id, "Game starting");
        let mut ctx = PhaseContext {
            state: &mut self.state,
            config: &self.config,
            events: self.events.as_ref(),
            game_seed: self.seed,
        };
        self.phase = PhaseState::enter(GamePhase::Preparation, &mut ctx)?;
        self.run_transitions()
    }

    /// Drain the queue and apply each action in sequence order:
    /// validate, apply, then chase phase transitions to quiescence.
    /// Rejected actions are reported in the outcomes and are no-ops.
    pub fn process_pending(&mut self) -> Result<Vec<ActionOutcome>, DomainError> {
        let actions = self.queue.process_actions();
        let mut outcomes = Vec::with_capacity(actions.len());
        for action in actions {
            let seq = action
                .seq
                .ok_or_else(|| DomainError::internal("queued action without sequence number"))?;
            let disposition = self.apply(&action)?;
            if let Disposition::Rejected { reason } = &disposition {
                debug!(game_id = %self.id, seq, player = %action.player, reason, "Action rejected");
            }
            outcomes.push(ActionOutcome {
                seq,
                player: action.player.clone(),
                disposition,
            });
            self.run_transitions()?;
        }
        Ok(outcomes)
    }

    fn apply(&mut self, action: &GameAction) -> Result<Disposition, DomainError> {
        if let Err(reason) = self.phase.validate_action(&self.state, action) {
            return Ok(Disposition::Rejected { reason });
        }
        let mut ctx = PhaseContext {
            state: &mut self.state,
            config: &self.config,
            events: self.events.as_ref(),
            game_seed: self.seed,
        };
        match self.phase.handle_action(&mut ctx, action)? {
            Some(result) => Ok(Disposition::Accepted { result }),
            // Validation passed but the phase refused: keep the two in
            // sync or this is unexplainable to the player.
            None => Ok(Disposition::Rejected {
                reason: "action rejected by phase".to_string(),
            }),
        }
    }

    /// Run exit/enter chains until the active phase wants to stay.
    fn run_transitions(&mut self) -> Result<(), DomainError> {
        for _ in 0..MAX_CHAINED_TRANSITIONS {
            let Some(next) = self.phase.check_transition(&self.state, &self.config) else {
                return Ok(());
            };
            let from = self.phase.phase();
            let mut ctx = PhaseContext {
                state: &mut self.state,
                config: &self.config,
                events: self.events.as_ref(),
                game_seed: self.seed,
            };
            self.phase.on_exit(&mut ctx)?;
            debug!(game_id = %self.id, ?from, to = ?next, "Phase transition");
            self.phase = PhaseState::enter(next, &mut ctx)?;
        }
        Err(DomainError::internal(format!(
            "phase transitions did not settle after {MAX_CHAINED_TRANSITIONS} steps"
        )))
    }

    /// Public snapshot: everything observable without owning a seat.
    pub fn snapshot(&self) -> GameSnapshot {
        let phase = match &self.phase {
            PhaseState::Waiting => PhaseSnapshot::Waiting,
            PhaseState::Preparation(p) => PhaseSnapshot::Preparation(PreparationSnapshot {
                weak_seats: p.weak_seats.clone(),
                awaiting_redeal: p.awaiting.clone(),
                redeal_count: self.state.round.redeal_count,
            }),
            PhaseState::Declaration(p) => PhaseSnapshot::Declaration(DeclarationSnapshot {
                order: p.order.to_vec(),
                to_act: p.to_act(),
                declared: declared_by_seat(&self.state, p),
                forbidden_value: p.forbidden_value(),
            }),
            PhaseState::Turn(p) => PhaseSnapshot::Turn(TurnSnapshot {
                turn_no: p.turn_no,
                starter: p.starter,
                to_act: p.to_act(),
                required_piece_count: p.required_piece_count(),
                plays: p
                    .plays
                    .iter()
                    .map(|(seat, play)| (*seat, play.pieces().to_vec()))
                    .collect(),
            }),
            PhaseState::Scoring(p) => PhaseSnapshot::Scoring(ScoringSnapshot {
                result: p
                    .result()
                    .cloned()
                    .unwrap_or_else(|| crate::domain::scoring::RoundResult {
                        round_number: self.state.round_no,
                        scores: Vec::new(),
                        redeal_multiplier: self.state.round.redeal_multiplier,
                        winner: None,
                    }),
            }),
            PhaseState::GameOver => {
                let standings = crate::domain::scoring::calculate_final_standings(
                    &self
                        .state
                        .players
                        .iter()
                        .map(|p| (p.name.clone(), p.score_total))
                        .collect::<Vec<_>>(),
                );
                PhaseSnapshot::GameOver(GameOverSnapshot {
                    winner: standings.first().map(|s| s.player.clone()),
                    standings,
                })
            }
        };
        GameSnapshot {
            game: build_header(&self.state),
            phase,
        }
    }

    /// One player's view: the public snapshot plus their own hand.
    pub fn player_view(&self, player: &str) -> Option<PlayerView> {
        let seat = self.state.seat_of(player)?;
        Some(PlayerView {
            seat,
            name: player.to_string(),
            hand: self.state.players[seat].hand.clone(),
            snapshot: self.snapshot(),
        })
    }
}

fn declared_by_seat(
    state: &GameState,
    phase: &crate::engine::phases::DeclarationPhase,
) -> Vec<Option<u8>> {
    let mut declared = vec![None; PLAYERS];
    for d in &phase.recorded {
        if let Some(seat) = state.seat_of(d.player()) {
            declared[seat] = Some(d.pile_count());
        }
    }
    declared
}

/// Commands the owning task accepts from handles.
enum Command {
    Start(oneshot::Sender<Result<(), DomainError>>),
    Submit {
        action: GameAction,
        reply: oneshot::Sender<Result<Vec<ActionOutcome>, DomainError>>,
    },
    Snapshot(oneshot::Sender<GameSnapshot>),
    PlayerView {
        player: String,
        reply: oneshot::Sender<Option<PlayerView>>,
    },
    Shutdown,
}

/// Cloneable front door to a spawned game task.
#[derive(Clone)]
pub struct GameHandle {
    id: GameId,
    commands: mpsc::UnboundedSender<Command>,
}

impl GameHandle {
    pub fn id(&self) -> GameId {
        self.id
    }

    pub async fn start(&self) -> Result<(), DomainError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Start(tx))?;
        rx.await.map_err(|_| closed())?
    }

    /// Submit one action and process the queue; returns the outcomes of
    /// everything processed in that pass (possibly more than this one
    /// action, if others were buffered concurrently).
    pub async fn submit(&self, action: GameAction) -> Result<Vec<ActionOutcome>, DomainError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Submit { action, reply: tx })?;
        rx.await.map_err(|_| closed())?
    }

    pub async fn snapshot(&self) -> Result<GameSnapshot, DomainError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx))?;
        rx.await.map_err(|_| closed())
    }

    pub async fn player_view(&self, player: &str) -> Result<Option<PlayerView>, DomainError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::PlayerView {
            player: player.to_string(),
            reply: tx,
        })?;
        rx.await.map_err(|_| closed())
    }

    pub fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }

    fn send(&self, command: Command) -> Result<(), DomainError> {
        self.commands.send(command).map_err(|_| closed())
    }
}

fn closed() -> DomainError {
    DomainError::internal("game task stopped")
}

/// Spawn the owning task for a game and return its handle. The task
/// serializes every mutation; a fatal domain error stops the instance
/// loudly rather than limping on with broken invariants.
pub fn spawn(mut game: Game) -> GameHandle {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let id = game.id();
    tokio::spawn(async move {
        while let Some(command) = rx.recv().await {
            match command {
                Command::Start(reply) => {
                    let result = game.start();
                    let fatal = matches!(result, Err(DomainError::Internal(_)));
                    let _ = reply.send(result);
                    if fatal {
                        break;
                    }
                }
                Command::Submit { action, reply } => {
                    game.submit_action(action);
                    let result = game.process_pending();
                    let fatal = matches!(result, Err(DomainError::Internal(_)));
                    if fatal {
                        error!(game_id = %id, "Fatal engine error; stopping game task");
                    }
                    let _ = reply.send(result);
                    if fatal {
                        break;
                    }
                }
                Command::Snapshot(reply) => {
                    let _ = reply.send(game.snapshot());
                }
                Command::PlayerView { player, reply } => {
                    let _ = reply.send(game.player_view(&player));
                }
                Command::Shutdown => break,
            }
        }
        debug!(game_id = %id, "Game task stopped");
    });
    GameHandle { id, commands: tx }
}
