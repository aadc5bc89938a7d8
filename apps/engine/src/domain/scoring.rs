//! Round scoring: declared vs. captured piles, redeal multiplier, and
//! final standings.

use serde::{Deserialize, Serialize};

use crate::domain::declaration::DeclarationSet;

/// Base score policy, before the redeal multiplier:
///
/// - declared 0, captured 0: +3 bonus for a successful zero call
/// - declared 0, captured n>0: -n, one point per pile wrongly captured
/// - declared n>0, captured n: n + 5 perfect bonus
/// - otherwise: -|declared - captured|
pub fn calculate_base_score(declared: u8, actual: u8) -> i32 {
    if declared == 0 && actual == 0 {
        3
    } else if declared == 0 {
        -(actual as i32)
    } else if declared == actual {
        declared as i32 + 5
    } else {
        -((declared as i32 - actual as i32).abs())
    }
}

/// One player's scoring line for a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundScore {
    pub player: String,
    pub declared_piles: u8,
    pub actual_piles: u8,
    pub base_score: i32,
    pub multiplier: f64,
    pub final_score: i32,
    pub is_perfect_round: bool,
}

/// All scoring lines for a round plus the round winner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round_number: u32,
    pub scores: Vec<RoundScore>,
    pub redeal_multiplier: f64,
    pub winner: Option<String>,
}

impl RoundResult {
    pub fn score_for(&self, player: &str) -> Option<&RoundScore> {
        self.scores.iter().find(|s| s.player == player)
    }
}

/// Compute every player's round score in declaration order.
///
/// The final score truncates `base * multiplier` toward zero (10.5
/// becomes 10, -1.5 becomes -1). A successful zero declaration is
/// deliberately not flagged as a perfect round even though it scores
/// positively; only a met non-zero declaration is.
///
/// The round winner is the highest final score, first in declaration
/// order on ties.
pub fn calculate_round_scores(
    declarations: &DeclarationSet,
    piles_captured: impl Fn(&str) -> u8,
    redeal_multiplier: f64,
    round_number: u32,
) -> RoundResult {
    let mut scores = Vec::with_capacity(declarations.len());
    for declaration in declarations.iter() {
        let declared = declaration.pile_count();
        let actual = piles_captured(declaration.player());
        let base_score = calculate_base_score(declared, actual);
        let final_score = (base_score as f64 * redeal_multiplier).trunc() as i32;
        scores.push(RoundScore {
            player: declaration.player().to_string(),
            declared_piles: declared,
            actual_piles: actual,
            base_score,
            multiplier: redeal_multiplier,
            final_score,
            is_perfect_round: declared > 0 && declared == actual,
        });
    }

    // Strict > keeps the first player in declaration order on ties.
    let mut winner: Option<&RoundScore> = None;
    for score in &scores {
        let better = match winner {
            Some(current) => score.final_score > current.final_score,
            None => true,
        };
        if better {
            winner = Some(score);
        }
    }

    let winner = winner.map(|s| s.player.clone());

    RoundResult {
        round_number,
        scores,
        redeal_multiplier,
        winner,
    }
}

/// A player's place in the final standings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub player: String,
    pub total_score: i32,
    pub rank: u32,
}

/// Sort by total score descending and assign ranks 1, 2, 3, ... Equal
/// scores keep their encounter order and still get distinct consecutive
/// ranks; there is no tie-collapsing.
pub fn calculate_final_standings(totals: &[(String, i32)]) -> Vec<PlayerStanding> {
    let mut ordered: Vec<&(String, i32)> = totals.iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1));
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, (player, total))| PlayerStanding {
            player: player.clone(),
            total_score: *total,
            rank: i as u32 + 1,
        })
        .collect()
}

/// Human-readable explanation of a player's round outcome. Descriptive
/// only; never feeds back into scoring math.
pub fn get_penalty_reason(declared: u8, actual: u8) -> String {
    if declared == actual {
        "met declaration, no penalty".to_string()
    } else if declared == 0 {
        format!("declared zero but captured {actual} piles")
    } else if actual > declared {
        format!("captured {actual} piles, {} over the declared {declared}", actual - declared)
    } else {
        format!("captured {actual} piles, {} short of the declared {declared}", declared - actual)
    }
}
