//! Deterministic piece dealing and weak-hand detection.

use crate::domain::pieces_types::{Piece, PieceColor, PieceKind, FULL_SET};
use crate::domain::rules::{HAND_SIZE, PLAYERS};
use crate::errors::domain::{DomainError, ValidationKind};

/// Simple deterministic RNG for shuffling.
///
/// SplitMix64-style generator: good statistical properties, fast, and
/// fully determined by the seed.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z ^= z >> 30;
        z = z.wrapping_mul(0xBF58476D1CE4E5B9);
        z ^= z >> 27;
        z = z.wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_range(&mut self, max: usize) -> usize {
        let m = max as u64;
        // Largest multiple of m that fits in u64; values past it are
        // rejected to avoid modulo bias.
        let limit = u64::MAX - (u64::MAX % m);

        loop {
            let x = self.next();
            if x < limit {
                return (x % m) as usize;
            }
        }
    }
}

/// Fisher-Yates shuffle using the deterministic RNG.
fn shuffle_with_seed(pieces: &mut [Piece], seed: u64) {
    let mut rng = SplitMix64::new(seed);
    for i in (1..pieces.len()).rev() {
        let j = rng.next_range(i + 1);
        pieces.swap(i, j);
    }
}

/// Deal the full 32-piece set into 4 hands of 8, deterministically for
/// a given seed. Hands are sorted ascending by strength for convenience.
pub fn deal_hands(player_count: usize, seed: u64) -> Result<[Vec<Piece>; PLAYERS], DomainError> {
    if player_count != PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerCount,
            format!("Player count must be {PLAYERS}"),
        ));
    }

    let mut set: Vec<Piece> = FULL_SET.clone();
    shuffle_with_seed(&mut set, seed);

    let mut hands: [Vec<Piece>; PLAYERS] = Default::default();
    for (player, hand_slot) in hands.iter_mut().enumerate() {
        let start = player * HAND_SIZE;
        let end = start + HAND_SIZE;
        let mut hand = set[start..end].to_vec();
        hand.sort();
        *hand_slot = hand;
    }

    Ok(hands)
}

/// A hand is weak when no piece is worth more than `threshold` points.
pub fn is_weak_hand(hand: &[Piece], threshold: u8) -> bool {
    hand.iter().all(|p| p.points() <= threshold)
}

/// Seat holding the red general. The full set contains exactly one, so
/// this is always present after a complete deal.
pub fn general_red_holder(hands: &[Vec<Piece>; PLAYERS]) -> Option<usize> {
    let general_red = Piece::new(PieceKind::General, PieceColor::Red);
    hands.iter().position(|hand| hand.contains(&general_red))
}
