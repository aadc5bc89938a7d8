//! Random-legal bots: the simplest possible `ActionProducer`.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use engine::domain::snapshot::{PhaseSnapshot, PlayerView};
use engine::{ActionPayload, ActionProducer, GameAction};

/// Picks uniformly among legal-enough moves. Plays may still form
/// unrecognized combinations; the engine records those as invalid plays
/// that cannot win, which is part of what the soak exercises.
pub struct RandomBot {
    rng: StdRng,
    /// Chance of accepting a redeal when offered one.
    redeal_appetite: f64,
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            redeal_appetite: 0.3,
        }
    }

    fn decide_declaration(&mut self, forbidden: Option<u8>) -> u8 {
        loop {
            let count = self.rng.random_range(0..=8u8);
            if Some(count) != forbidden {
                return count;
            }
        }
    }

    fn pick_pieces(&mut self, view: &PlayerView, count: usize) -> Vec<engine::domain::Piece> {
        let mut hand = view.hand.clone();
        let take = count.min(hand.len());
        let mut picked = Vec::with_capacity(take);
        for _ in 0..take {
            let i = self.rng.random_range(0..hand.len());
            picked.push(hand.swap_remove(i));
        }
        picked
    }
}

#[async_trait]
impl ActionProducer for RandomBot {
    async fn next_action(&mut self, view: &PlayerView) -> Option<GameAction> {
        match &view.snapshot.phase {
            PhaseSnapshot::Preparation(prep) => {
                if !prep.awaiting_redeal.contains(&view.seat) {
                    return None;
                }
                let accept = self.rng.random_bool(self.redeal_appetite);
                Some(GameAction::new(
                    view.name.clone(),
                    ActionPayload::RedealResponse { accept },
                ))
            }
            PhaseSnapshot::Declaration(decl) => {
                if decl.to_act != Some(view.seat) {
                    return None;
                }
                let count = self.decide_declaration(decl.forbidden_value);
                Some(GameAction::new(
                    view.name.clone(),
                    ActionPayload::Declare {
                        count,
                        forced: false,
                    },
                ))
            }
            PhaseSnapshot::Turn(turn) => {
                if turn.to_act != Some(view.seat) || view.hand.is_empty() {
                    return None;
                }
                let count = match turn.required_piece_count {
                    Some(required) => required,
                    // Leading: keep plays small so rounds have texture.
                    None => self.rng.random_range(1..=3usize),
                };
                let pieces = self.pick_pieces(view, count);
                Some(GameAction::new(
                    view.name.clone(),
                    ActionPayload::PlayPieces { pieces },
                ))
            }
            PhaseSnapshot::Waiting
            | PhaseSnapshot::Scoring(_)
            | PhaseSnapshot::GameOver(_) => None,
        }
    }
}
