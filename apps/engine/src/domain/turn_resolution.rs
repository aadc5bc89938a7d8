//! Turn resolution: given the plays of one turn, decide which one wins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::plays::{PlayKind, TurnPlay};

/// Immutable outcome of resolving one turn. `plays` keeps every input
/// play, including ones that could not win.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    pub turn_number: u32,
    pub plays: Vec<TurnPlay>,
    pub winner: Option<String>,
    pub winning_play: Option<TurnPlay>,
    pub pile_awarded: bool,
}

/// Resolve one turn.
///
/// The first play in input order is the lead; its kind is the target
/// kind for the turn. Plays that miss `required_piece_count`, are
/// invalid, or are of a different kind than the lead are recorded but
/// cannot win. Highest point total wins; equal totals go to the earlier
/// position in input order.
pub fn resolve_turn(
    plays: &[TurnPlay],
    turn_number: u32,
    required_piece_count: Option<usize>,
) -> TurnResult {
    let eligible: Vec<&TurnPlay> = plays
        .iter()
        .filter(|p| match required_piece_count {
            Some(required) => p.piece_count() == required,
            None => true,
        })
        .collect();

    let target_kind = eligible.first().map(|p| p.kind());

    let mut best: Option<&TurnPlay> = None;
    for &play in &eligible {
        if !play.is_valid() || Some(play.kind()) != target_kind {
            continue;
        }
        // Strict > keeps the earliest play on equal points.
        match best {
            Some(current) if play.total_points() <= current.total_points() => {}
            _ => best = Some(play),
        }
    }

    TurnResult {
        turn_number,
        plays: plays.to_vec(),
        winner: best.map(|p| p.player().to_string()),
        winning_play: best.cloned(),
        pile_awarded: best.is_some(),
    }
}

/// Pure per-player validation report. An empty string means the play is
/// fine; anything else is a human-readable violation. Never fails.
pub fn validate_turn_plays(
    plays: &[TurnPlay],
    required_piece_count: Option<usize>,
) -> BTreeMap<String, String> {
    let mut report = BTreeMap::new();
    for play in plays {
        let message = if let Some(required) = required_piece_count {
            if play.piece_count() != required {
                format!("expected {required} pieces, played {}", play.piece_count())
            } else if !play.is_valid() {
                "pieces do not form a recognized combination".to_string()
            } else {
                String::new()
            }
        } else if !play.is_valid() {
            "pieces do not form a recognized combination".to_string()
        } else {
            String::new()
        };
        report.insert(play.player().to_string(), message);
    }
    report
}

/// Aggregate statistics over resolved turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnStatistics {
    pub turns_resolved: usize,
    pub piles_awarded: usize,
    pub wins_per_player: BTreeMap<String, usize>,
    pub play_kind_counts: BTreeMap<PlayKind, usize>,
    pub average_winning_points: f64,
}

/// Pure aggregation over a list of turn results: win counts, play-kind
/// frequencies, and the mean point total of winning plays.
pub fn calculate_turn_statistics(results: &[TurnResult]) -> TurnStatistics {
    let mut wins_per_player: BTreeMap<String, usize> = BTreeMap::new();
    let mut play_kind_counts: BTreeMap<PlayKind, usize> = BTreeMap::new();
    let mut winning_points_sum: u64 = 0;
    let mut piles_awarded = 0usize;

    for result in results {
        for play in &result.plays {
            *play_kind_counts.entry(play.kind()).or_default() += 1;
        }
        if let Some(winner) = &result.winner {
            *wins_per_player.entry(winner.clone()).or_default() += 1;
        }
        if result.pile_awarded {
            piles_awarded += 1;
        }
        if let Some(play) = &result.winning_play {
            winning_points_sum += play.total_points() as u64;
        }
    }

    let average_winning_points = if piles_awarded == 0 {
        0.0
    } else {
        winning_points_sum as f64 / piles_awarded as f64
    };

    TurnStatistics {
        turns_resolved: results.len(),
        piles_awarded,
        wins_per_player,
        play_kind_counts,
        average_winning_points,
    }
}
