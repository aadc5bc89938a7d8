use proptest::prelude::*;

/// Property-based tests for turn resolution, cross-checked against an
/// independent oracle.
use crate::domain::plays::TurnPlay;
use crate::domain::test_gens;
use crate::domain::turn_resolution::resolve_turn;

/// Oracle: index of the winning play, resolved by brute force (count
/// filter, lead kind, max points, earliest on tie).
fn oracle_winner(plays: &[TurnPlay], required: Option<usize>) -> Option<usize> {
    let eligible: Vec<usize> = (0..plays.len())
        .filter(|&i| required.map_or(true, |r| plays[i].piece_count() == r))
        .collect();
    let target = eligible.first().map(|&i| plays[i].kind())?;

    let mut best: Option<usize> = None;
    for &i in &eligible {
        if !plays[i].is_valid() || plays[i].kind() != target {
            continue;
        }
        match best {
            Some(b) if plays[i].total_points() <= plays[b].total_points() => {}
            _ => best = Some(i),
        }
    }
    best
}

proptest! {
    /// The resolver agrees with the oracle on arbitrary plays.
    #[test]
    fn prop_winner_matches_oracle(
        plays in test_gens::turn_plays(4),
        required in prop::option::of(1usize..=6),
    ) {
        let result = resolve_turn(&plays, 1, required);
        let oracle = oracle_winner(&plays, required).map(|i| plays[i].player().to_string());
        prop_assert_eq!(result.winner.clone(), oracle,
            "resolver and oracle disagree; required={:?}, plays={:?}", required, plays);
        prop_assert_eq!(result.pile_awarded, result.winner.is_some());
    }

    /// Ordering law: a play with strictly more points than the winner,
    /// matching kind and count, cannot exist.
    #[test]
    fn prop_no_eligible_play_outscores_the_winner(
        plays in test_gens::turn_plays(4),
        required in prop::option::of(1usize..=6),
    ) {
        let result = resolve_turn(&plays, 1, required);
        let Some(winning) = &result.winning_play else { return Ok(()); };

        for play in &plays {
            let count_ok = required.map_or(true, |r| play.piece_count() == r);
            if count_ok && play.is_valid() && play.kind() == winning.kind() {
                prop_assert!(play.total_points() <= winning.total_points(),
                    "{} outscores the declared winner", play.player());
            }
        }
    }

    /// Tie-break law: on equal points the winner is the earliest such
    /// play in input order.
    #[test]
    fn prop_ties_break_to_earliest_position(
        plays in test_gens::turn_plays(4),
        required in prop::option::of(1usize..=6),
    ) {
        let result = resolve_turn(&plays, 1, required);
        let Some(winning) = &result.winning_play else { return Ok(()); };

        let first_with_winning_score = plays.iter().find(|play| {
            required.map_or(true, |r| play.piece_count() == r)
                && play.is_valid()
                && play.kind() == winning.kind()
                && play.total_points() == winning.total_points()
        });
        prop_assert_eq!(
            first_with_winning_score.map(|p| p.player()),
            Some(winning.player())
        );
    }

    /// Resolution is pure: identical input, identical output.
    #[test]
    fn prop_resolution_is_idempotent(
        plays in test_gens::turn_plays(4),
        required in prop::option::of(1usize..=6),
        turn_no in 1u32..=8,
    ) {
        let a = resolve_turn(&plays, turn_no, required);
        let b = resolve_turn(&plays, turn_no, required);
        prop_assert_eq!(a, b);
    }

    /// Every input play appears in the result record, winner or not.
    #[test]
    fn prop_result_keeps_all_plays(
        plays in test_gens::turn_plays(4),
        required in prop::option::of(1usize..=6),
    ) {
        let result = resolve_turn(&plays, 1, required);
        prop_assert_eq!(result.plays.len(), plays.len());
        for (kept, original) in result.plays.iter().zip(plays.iter()) {
            prop_assert_eq!(kept, original);
        }
    }
}
