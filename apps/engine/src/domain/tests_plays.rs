use crate::domain::pieces_types::{Piece, PieceColor, PieceKind};
use crate::domain::plays::{classify, PlayKind, TurnPlay};
use crate::errors::domain::{DomainError, ValidationKind};

use PieceColor::{Black, Red};
use PieceKind::{Advisor, Cannon, Chariot, Elephant, General, Horse, Soldier};

fn p(kind: PieceKind, color: PieceColor) -> Piece {
    Piece::new(kind, color)
}

fn play(pieces: Vec<Piece>) -> TurnPlay {
    TurnPlay::new("ann", pieces).unwrap()
}

#[test]
fn classifies_singles_and_pairs() {
    assert_eq!(classify(&[p(General, Red)]), PlayKind::Single);
    assert_eq!(classify(&[p(Horse, Red), p(Horse, Red)]), PlayKind::Pair);
    // Same kind, different color is not a pair.
    assert_eq!(
        classify(&[p(Horse, Red), p(Horse, Black)]),
        PlayKind::Invalid
    );
    assert_eq!(
        classify(&[p(Horse, Red), p(Cannon, Red)]),
        PlayKind::Invalid
    );
}

#[test]
fn classifies_soldier_groups() {
    assert_eq!(
        classify(&vec![p(Soldier, Black); 3]),
        PlayKind::ThreeOfAKind
    );
    assert_eq!(classify(&vec![p(Soldier, Red); 4]), PlayKind::FourOfAKind);
    assert_eq!(classify(&vec![p(Soldier, Red); 5]), PlayKind::FiveOfAKind);
    // Mixed colors break the group.
    assert_eq!(
        classify(&[p(Soldier, Red), p(Soldier, Red), p(Soldier, Black)]),
        PlayKind::Invalid
    );
}

#[test]
fn classifies_straight_family() {
    assert_eq!(
        classify(&[p(Chariot, Red), p(Horse, Red), p(Cannon, Red)]),
        PlayKind::Straight
    );
    // Order never matters.
    assert_eq!(
        classify(&[p(Cannon, Black), p(Chariot, Black), p(Horse, Black)]),
        PlayKind::Straight
    );
    assert_eq!(
        classify(&[p(Chariot, Red), p(Chariot, Red), p(Horse, Red), p(Cannon, Red)]),
        PlayKind::ExtendedStraight
    );
    assert_eq!(
        classify(&[
            p(Chariot, Red),
            p(Chariot, Red),
            p(Horse, Red),
            p(Horse, Red),
            p(Cannon, Red)
        ]),
        PlayKind::ExtendedStraightFive
    );
    assert_eq!(
        classify(&[
            p(Chariot, Black),
            p(Chariot, Black),
            p(Horse, Black),
            p(Horse, Black),
            p(Cannon, Black),
            p(Cannon, Black)
        ]),
        PlayKind::DoubleStraight
    );
}

#[test]
fn straight_needs_all_three_names_and_one_color() {
    assert_eq!(
        classify(&[p(Chariot, Red), p(Chariot, Red), p(Horse, Red)]),
        PlayKind::Invalid
    );
    assert_eq!(
        classify(&[p(Chariot, Red), p(Horse, Black), p(Cannon, Red)]),
        PlayKind::Invalid
    );
    // An elephant in the middle of the family is not a straight.
    assert_eq!(
        classify(&[p(Chariot, Red), p(Elephant, Red), p(Cannon, Red)]),
        PlayKind::Invalid
    );
    // Six pieces must be exactly two of each name.
    assert_eq!(
        classify(&[
            p(Chariot, Red),
            p(Chariot, Red),
            p(Chariot, Red),
            p(Horse, Red),
            p(Cannon, Red),
            p(Cannon, Red)
        ]),
        PlayKind::Invalid
    );
}

#[test]
fn oversized_plays_are_invalid() {
    assert_eq!(classify(&vec![p(Soldier, Red); 7]), PlayKind::Invalid);
}

#[test]
fn total_points_sums_piece_values() {
    let play = play(vec![p(Chariot, Red), p(Horse, Red), p(Cannon, Red)]);
    assert_eq!(play.total_points(), 8 + 6 + 4);
    assert_eq!(play.kind(), PlayKind::Straight);
    assert!(play.is_valid());
}

#[test]
fn beats_within_kind_on_points() {
    let high = play(vec![p(Advisor, Red), p(Advisor, Red)]); // 24
    let low = play(vec![p(Cannon, Black), p(Cannon, Black)]); // 6
    assert!(high.beats(&low));
    assert!(!low.beats(&high));
}

#[test]
fn equal_points_beat_neither_way() {
    let a = play(vec![p(Elephant, Red), p(Elephant, Red)]);
    let b = play(vec![p(Elephant, Red), p(Elephant, Red)]);
    assert!(!a.beats(&b));
    assert!(!b.beats(&a));
}

#[test]
fn different_kinds_never_compare() {
    // The single is worth more points, but a type mismatch is a
    // non-comparison, not a loss.
    let single = play(vec![p(General, Red)]);
    let pair = play(vec![p(Soldier, Black), p(Soldier, Black)]);
    assert!(!single.beats(&pair));
    assert!(!pair.beats(&single));
}

#[test]
fn invalid_plays_never_beat_or_lose() {
    let invalid = play(vec![p(Horse, Red), p(Cannon, Red)]);
    let valid = play(vec![p(Soldier, Black), p(Soldier, Black)]);
    assert!(!invalid.is_valid());
    assert!(!invalid.beats(&valid));
    assert!(!valid.beats(&invalid));
}

#[test]
fn empty_play_is_a_construction_error() {
    let err = TurnPlay::new("ann", Vec::new()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation {
            kind: ValidationKind::EmptyPlay,
            ..
        }
    ));
    let err = TurnPlay::new("", vec![p(General, Red)]).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation {
            kind: ValidationKind::EmptyPlayerName,
            ..
        }
    ));
}

#[test]
fn turn_play_round_trips_through_json() {
    let original = play(vec![p(Chariot, Red), p(Horse, Red), p(Cannon, Red)]);
    let json = serde_json::to_string(&original).unwrap();
    let back: TurnPlay = serde_json::from_str(&json).unwrap();
    assert_eq!(back, original);
    assert_eq!(back.kind(), PlayKind::Straight);
}
