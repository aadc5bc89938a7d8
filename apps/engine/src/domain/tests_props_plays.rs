use proptest::prelude::*;

/// Property-based tests for play classification and comparison.
use crate::domain::plays::{classify, PlayKind, TurnPlay};
use crate::domain::test_gens;

proptest! {
    /// Classification ignores piece order.
    #[test]
    fn prop_classification_is_order_invariant(
        pieces in test_gens::pieces(6),
        seed in any::<u64>(),
    ) {
        let baseline = classify(&pieces);

        // Cheap deterministic shuffle of the same multiset.
        let mut shuffled = pieces.clone();
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state % (i as u64 + 1)) as usize;
            shuffled.swap(i, j);
        }

        prop_assert_eq!(classify(&shuffled), baseline);
    }

    /// Generated canonical shapes classify as their shape.
    #[test]
    fn prop_canonical_shapes_are_recognized(
        single in test_gens::single(),
        pair in test_gens::pair(),
        straight in test_gens::straight(),
        triple in test_gens::three_of_a_kind(),
    ) {
        prop_assert_eq!(classify(&single), PlayKind::Single);
        prop_assert_eq!(classify(&pair), PlayKind::Pair);
        prop_assert_eq!(classify(&straight), PlayKind::Straight);
        prop_assert_eq!(classify(&triple), PlayKind::ThreeOfAKind);
    }

    /// beats() is never symmetric: two plays cannot both beat each other.
    #[test]
    fn prop_beats_is_asymmetric(
        a_pieces in test_gens::pieces(6),
        b_pieces in test_gens::pieces(6),
    ) {
        let a = TurnPlay::new("a", a_pieces).unwrap();
        let b = TurnPlay::new("b", b_pieces).unwrap();
        prop_assert!(!(a.beats(&b) && b.beats(&a)));
    }

    /// Valid plays of different kinds never beat each other, in either
    /// direction.
    #[test]
    fn prop_kind_mismatch_is_a_non_comparison(
        a_pieces in test_gens::valid_play_pieces(),
        b_pieces in test_gens::valid_play_pieces(),
    ) {
        let a = TurnPlay::new("a", a_pieces).unwrap();
        let b = TurnPlay::new("b", b_pieces).unwrap();
        prop_assume!(a.kind() != b.kind());
        prop_assert!(!a.beats(&b));
        prop_assert!(!b.beats(&a));
    }

    /// Within one kind, beats() agrees exactly with the point totals.
    #[test]
    fn prop_same_kind_beats_follows_points(
        a_pieces in test_gens::pair(),
        b_pieces in test_gens::pair(),
    ) {
        let a = TurnPlay::new("a", a_pieces).unwrap();
        let b = TurnPlay::new("b", b_pieces).unwrap();
        prop_assert_eq!(a.beats(&b), a.total_points() > b.total_points());
        prop_assert_eq!(b.beats(&a), b.total_points() > a.total_points());
    }

    /// An invalid play neither beats nor is beaten.
    #[test]
    fn prop_invalid_plays_never_compare(
        pieces in test_gens::pieces(6),
        other in test_gens::valid_play_pieces(),
    ) {
        let a = TurnPlay::new("a", pieces).unwrap();
        prop_assume!(!a.is_valid());
        let b = TurnPlay::new("b", other).unwrap();
        prop_assert!(!a.beats(&b));
        prop_assert!(!b.beats(&a));
    }

    /// Total points always equals the sum of the piece values.
    #[test]
    fn prop_total_points_is_piece_sum(pieces in test_gens::pieces(6)) {
        let expected: u16 = pieces.iter().map(|p| p.points() as u16).sum();
        let play = TurnPlay::new("a", pieces).unwrap();
        prop_assert_eq!(play.total_points(), expected);
    }

    /// A whole dealt hand never forms a combination: recognized shapes
    /// top out at six pieces.
    #[test]
    fn prop_full_hands_are_not_plays(hand in test_gens::hand_from_set(8)) {
        let play = TurnPlay::new("a", hand).unwrap();
        prop_assert_eq!(play.kind(), PlayKind::Invalid);
        prop_assert!(!play.is_valid());
    }
}
