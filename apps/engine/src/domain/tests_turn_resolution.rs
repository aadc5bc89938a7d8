use crate::domain::pieces_types::{Piece, PieceColor, PieceKind};
use crate::domain::plays::{PlayKind, TurnPlay};
use crate::domain::turn_resolution::{
    calculate_turn_statistics, resolve_turn, validate_turn_plays,
};

use PieceColor::{Black, Red};
use PieceKind::{Cannon, Chariot, Elephant, General, Horse, Soldier};

fn p(kind: PieceKind, color: PieceColor) -> Piece {
    Piece::new(kind, color)
}

fn play(player: &str, pieces: Vec<Piece>) -> TurnPlay {
    TurnPlay::new(player, pieces).unwrap()
}

#[test]
fn highest_points_of_lead_kind_wins() {
    let plays = vec![
        play("A", vec![p(Cannon, Black), p(Cannon, Black)]), // pair, 6
        play("B", vec![p(Elephant, Red), p(Elephant, Red)]), // pair, 20
        play("C", vec![p(Horse, Black), p(Horse, Black)]),   // pair, 10
    ];
    let result = resolve_turn(&plays, 1, Some(2));
    assert_eq!(result.winner.as_deref(), Some("B"));
    assert!(result.pile_awarded);
    assert_eq!(result.plays.len(), 3);
    assert_eq!(result.winning_play.as_ref().unwrap().total_points(), 20);
}

#[test]
fn off_kind_play_cannot_win_even_with_more_points() {
    // A leads a pair; D's lone general is worth more than any pair here
    // but singles are not the turn's kind. A and C tie on points; the
    // earlier seat in order takes it.
    let plays = vec![
        play("A", vec![p(Elephant, Red), p(Elephant, Red)]), // pair, 20
        play("B", vec![p(Chariot, Black), p(Chariot, Black)]), // pair, 14
        play("C", vec![p(Elephant, Red), p(Elephant, Red)]), // pair, 20
        play("D", vec![p(General, Red)]),                    // single, 14
    ];
    let result = resolve_turn(&plays, 3, None);
    assert_eq!(result.winner.as_deref(), Some("A"));
    assert!(result.pile_awarded);
}

#[test]
fn required_count_excludes_mismatched_plays() {
    let plays = vec![
        play("A", vec![p(Horse, Red), p(Horse, Red)]), // pair, 12
        play("B", vec![p(General, Red)]),              // 1 piece, filtered out
        play("C", vec![p(Elephant, Black), p(Elephant, Black)]), // pair, 18
    ];
    let result = resolve_turn(&plays, 1, Some(2));
    assert_eq!(result.winner.as_deref(), Some("C"));
    // The filtered play is still part of the record.
    assert_eq!(result.plays.len(), 3);
}

#[test]
fn no_valid_play_means_no_winner_and_no_pile() {
    let plays = vec![
        play("A", vec![p(Horse, Red), p(Cannon, Red)]), // invalid
        play("B", vec![p(Soldier, Red), p(General, Red)]), // invalid
    ];
    let result = resolve_turn(&plays, 2, None);
    assert_eq!(result.winner, None);
    assert_eq!(result.winning_play, None);
    assert!(!result.pile_awarded);
    assert_eq!(result.plays.len(), 2);
}

#[test]
fn invalid_lead_blocks_the_turn() {
    // The lead sets the target kind; an invalid lead means no play can
    // match it, even valid ones later in order.
    let plays = vec![
        play("A", vec![p(Horse, Red), p(Cannon, Red)]), // invalid lead
        play("B", vec![p(Soldier, Red), p(Soldier, Red)]), // valid pair
    ];
    let result = resolve_turn(&plays, 1, None);
    assert_eq!(result.winner, None);
    assert!(!result.pile_awarded);
}

#[test]
fn valid_play_of_non_lead_kind_cannot_rescue_the_turn() {
    let plays = vec![
        play("A", vec![p(Soldier, Red), p(Soldier, Red)]), // pair (lead kind)
        play("B", vec![p(General, Red), p(Soldier, Black)]), // invalid
    ];
    let result = resolve_turn(&plays, 1, Some(2));
    assert_eq!(result.winner.as_deref(), Some("A"));
}

#[test]
fn resolution_is_pure() {
    let plays = vec![
        play("A", vec![p(Elephant, Red), p(Elephant, Red)]),
        play("B", vec![p(Chariot, Black), p(Chariot, Black)]),
    ];
    let first = resolve_turn(&plays, 5, Some(2));
    let second = resolve_turn(&plays, 5, Some(2));
    assert_eq!(first, second);
}

#[test]
fn validate_turn_plays_reports_per_player() {
    let plays = vec![
        play("A", vec![p(Horse, Red), p(Horse, Red)]),
        play("B", vec![p(General, Red)]),
        play("C", vec![p(Horse, Red), p(Cannon, Red)]),
    ];
    let report = validate_turn_plays(&plays, Some(2));
    assert_eq!(report["A"], "");
    assert_eq!(report["B"], "expected 2 pieces, played 1");
    assert_eq!(report["C"], "pieces do not form a recognized combination");
}

#[test]
fn validate_turn_plays_without_required_count() {
    let plays = vec![
        play("A", vec![p(General, Red)]),
        play("B", vec![p(Horse, Red), p(Cannon, Red)]),
    ];
    let report = validate_turn_plays(&plays, None);
    assert_eq!(report["A"], "");
    assert!(!report["B"].is_empty());
}

#[test]
fn statistics_aggregate_wins_kinds_and_points() {
    let results = vec![
        resolve_turn(
            &[
                play("A", vec![p(Elephant, Red), p(Elephant, Red)]), // 20, wins
                play("B", vec![p(Horse, Black), p(Horse, Black)]),   // 10
            ],
            1,
            Some(2),
        ),
        resolve_turn(
            &[
                play("B", vec![p(General, Red)]), // 14, wins
                play("A", vec![p(Soldier, Black)]),
            ],
            2,
            Some(1),
        ),
        resolve_turn(
            &[
                play("A", vec![p(General, Black)]), // 13, wins
                play("B", vec![p(Soldier, Red)]),
            ],
            3,
            Some(1),
        ),
    ];

    let stats = calculate_turn_statistics(&results);
    assert_eq!(stats.turns_resolved, 3);
    assert_eq!(stats.piles_awarded, 3);
    assert_eq!(stats.wins_per_player["A"], 2);
    assert_eq!(stats.wins_per_player["B"], 1);
    assert_eq!(stats.play_kind_counts[&PlayKind::Pair], 2);
    assert_eq!(stats.play_kind_counts[&PlayKind::Single], 4);
    let expected_avg = (20.0 + 14.0 + 13.0) / 3.0;
    assert!((stats.average_winning_points - expected_avg).abs() < 1e-9);
}

#[test]
fn statistics_over_empty_results() {
    let stats = calculate_turn_statistics(&[]);
    assert_eq!(stats.turns_resolved, 0);
    assert_eq!(stats.piles_awarded, 0);
    assert!(stats.wins_per_player.is_empty());
    assert_eq!(stats.average_winning_points, 0.0);
}
