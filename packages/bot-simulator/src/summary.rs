//! Aggregation of simulation results across games.

use std::collections::BTreeMap;

use serde::Serialize;

use engine::domain::turn_resolution::TurnStatistics;
use engine::GameEvent;

#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub games: usize,
    pub rounds_played: usize,
    pub redeals_executed: usize,
    pub wins_per_player: BTreeMap<String, usize>,
    pub average_final_score: BTreeMap<String, f64>,
    pub turn_statistics: Option<TurnStatistics>,
}

#[derive(Debug, Default)]
pub struct SummaryBuilder {
    games: usize,
    rounds_played: usize,
    redeals_executed: usize,
    wins_per_player: BTreeMap<String, usize>,
    score_totals: BTreeMap<String, i64>,
    turn_results: Vec<engine::domain::TurnResult>,
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one finished game's event stream into the running totals.
    pub fn record_game(&mut self, events: &[GameEvent]) {
        self.games += 1;
        for event in events {
            match event {
                GameEvent::RoundScored { .. } => {
                    self.rounds_played += 1;
                }
                GameEvent::RedealExecuted { .. } => {
                    self.redeals_executed += 1;
                }
                GameEvent::TurnResolved { result } => {
                    self.turn_results.push(result.clone());
                }
                GameEvent::GameOver { winner, standings } => {
                    if let Some(winner) = winner {
                        *self.wins_per_player.entry(winner.clone()).or_default() += 1;
                    }
                    for standing in standings {
                        *self
                            .score_totals
                            .entry(standing.player.clone())
                            .or_default() += standing.total_score as i64;
                    }
                }
                _ => {}
            }
        }
    }

    pub fn finish(self) -> RunSummary {
        let average_final_score = self
            .score_totals
            .iter()
            .map(|(player, total)| {
                (player.clone(), *total as f64 / self.games.max(1) as f64)
            })
            .collect();
        let turn_statistics = if self.turn_results.is_empty() {
            None
        } else {
            Some(engine::domain::calculate_turn_statistics(&self.turn_results))
        };
        RunSummary {
            games: self.games,
            rounds_played: self.rounds_played,
            redeals_executed: self.redeals_executed,
            wins_per_player: self.wins_per_player,
            average_final_score,
            turn_statistics,
        }
    }
}
