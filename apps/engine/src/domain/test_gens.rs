// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::pieces_types::{Piece, PieceColor, PieceKind, FULL_SET};
use crate::domain::plays::TurnPlay;

pub fn color() -> impl Strategy<Value = PieceColor> {
    prop_oneof![Just(PieceColor::Red), Just(PieceColor::Black)]
}

pub fn kind() -> impl Strategy<Value = PieceKind> {
    prop_oneof![
        Just(PieceKind::Soldier),
        Just(PieceKind::Cannon),
        Just(PieceKind::Horse),
        Just(PieceKind::Chariot),
        Just(PieceKind::Elephant),
        Just(PieceKind::Advisor),
        Just(PieceKind::General),
    ]
}

pub fn piece() -> impl Strategy<Value = Piece> {
    (kind(), color()).prop_map(|(kind, color)| Piece::new(kind, color))
}

/// Arbitrary multiset of 1..=7 pieces (not necessarily a legal play).
pub fn pieces(max_len: usize) -> impl Strategy<Value = Vec<Piece>> {
    prop::collection::vec(piece(), 1..=max_len)
}

/// A hand drawn without replacement from the canonical set.
pub fn hand_from_set(count: usize) -> impl Strategy<Value = Vec<Piece>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut set: Vec<Piece> = FULL_SET.clone();
        // Shuffle and take the first N.
        for i in 0..count.min(set.len()) {
            let j = rng.random_range(i..set.len());
            set.swap(i, j);
        }
        set.truncate(count);
        set
    })
}

/// A valid single play.
pub fn single() -> impl Strategy<Value = Vec<Piece>> {
    piece().prop_map(|p| vec![p])
}

/// A valid pair play (same kind, same color).
pub fn pair() -> impl Strategy<Value = Vec<Piece>> {
    (kind(), color()).prop_map(|(kind, color)| vec![Piece::new(kind, color); 2])
}

/// A valid straight play (chariot, horse, cannon of one color).
pub fn straight() -> impl Strategy<Value = Vec<Piece>> {
    color().prop_map(|color| {
        vec![
            Piece::new(PieceKind::Chariot, color),
            Piece::new(PieceKind::Horse, color),
            Piece::new(PieceKind::Cannon, color),
        ]
    })
}

/// A valid three-of-a-kind play (three soldiers of one color).
pub fn three_of_a_kind() -> impl Strategy<Value = Vec<Piece>> {
    color().prop_map(|color| vec![Piece::new(PieceKind::Soldier, color); 3])
}

/// Any valid play shape.
pub fn valid_play_pieces() -> impl Strategy<Value = Vec<Piece>> {
    prop_oneof![single(), pair(), straight(), three_of_a_kind()]
}

/// A full turn of plays by distinct players, one per seat.
pub fn turn_plays(players: usize) -> impl Strategy<Value = Vec<TurnPlay>> {
    prop::collection::vec(pieces(6), players..=players).prop_map(|piece_sets| {
        piece_sets
            .into_iter()
            .enumerate()
            .map(|(i, pieces)| TurnPlay::new(format!("p{i}"), pieces).expect("non-empty play"))
            .collect()
    })
}
