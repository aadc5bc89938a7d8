//! Game configuration, with environment-variable overrides.

use std::env;

use serde::{Deserialize, Serialize};

use crate::domain::rules::DEFAULT_WEAK_HAND_THRESHOLD;
use crate::errors::domain::{DomainError, ValidationKind};

/// Tunable rule parameters for one game instance. Constructed once and
/// passed into the engine; never read from ambient globals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Total score that ends the game after a scoring phase.
    pub win_score: i32,
    /// Hard cap on rounds played.
    pub max_rounds: u32,
    /// Cap on executed redeals within one round.
    pub max_redeals_per_round: u32,
    /// A hand with no piece above this point value is weak.
    pub weak_hand_threshold: u8,
    /// Added to the round multiplier on each executed redeal.
    pub redeal_multiplier_step: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            win_score: 50,
            max_rounds: 20,
            max_redeals_per_round: 3,
            weak_hand_threshold: DEFAULT_WEAK_HAND_THRESHOLD,
            redeal_multiplier_step: 0.5,
        }
    }
}

impl GameConfig {
    /// Build a config from `LIAP_*` environment variables, falling back
    /// to defaults for unset values. Malformed values fail loudly.
    pub fn from_env() -> Result<Self, DomainError> {
        let defaults = Self::default();
        Ok(Self {
            win_score: env_parsed("LIAP_WIN_SCORE", defaults.win_score)?,
            max_rounds: env_parsed("LIAP_MAX_ROUNDS", defaults.max_rounds)?,
            max_redeals_per_round: env_parsed(
                "LIAP_MAX_REDEALS_PER_ROUND",
                defaults.max_redeals_per_round,
            )?,
            weak_hand_threshold: env_parsed(
                "LIAP_WEAK_HAND_THRESHOLD",
                defaults.weak_hand_threshold,
            )?,
            redeal_multiplier_step: env_parsed(
                "LIAP_REDEAL_MULTIPLIER_STEP",
                defaults.redeal_multiplier_step,
            )?,
        })
    }
}

fn env_parsed<T: std::str::FromStr>(var: &str, default: T) -> Result<T, DomainError> {
    match env::var(var) {
        Ok(raw) => raw.parse::<T>().map_err(|_| {
            DomainError::validation(
                ValidationKind::Other("CONFIG".into()),
                format!("{var} is not a valid value: '{raw}'"),
            )
        }),
        Err(_) => Ok(default),
    }
}
