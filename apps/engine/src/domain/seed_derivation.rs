//! RNG seed derivation for deterministic game behavior.
//!
//! All in-game randomness flows from one base game seed; per-deal seeds
//! are derived so that a game is fully reproducible, including redeals.

/// Derive the seed used to deal a specific round.
///
/// Unique per (game, round, redeal) combination: the same game seed
/// replays identically, and each redeal within a round produces a fresh
/// deterministic shuffle.
pub fn derive_dealing_seed(game_seed: i64, round_number: u32, redeal_count: u32) -> u64 {
    // Sign doesn't matter for seeding; wrapping arithmetic keeps the
    // derivation total.
    let base = game_seed as u64;
    base.wrapping_add((round_number as u64).wrapping_mul(1_000_000))
        .wrapping_add((redeal_count as u64).wrapping_mul(1_000))
        .wrapping_add(2)
}
