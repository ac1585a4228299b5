//! Property-based tests for the quadrature decoder.
//! Whatever the edge sequence, detents are only counted at the rest phase and
//! reported exactly once.
#![allow(clippy::unwrap_used)]

use platform::{RotaryDirection, RotaryEncoder};

/// Gray-code phases of one clockwise detent, starting after rest (`11`).
const CW: [(bool, bool); 4] = [(true, false), (false, false), (false, true), (true, true)];
/// Gray-code phases of one counter-clockwise detent.
const CCW: [(bool, bool); 4] = [(false, true), (false, false), (true, false), (true, true)];

fn turn(enc: &RotaryEncoder, clockwise: bool) {
    let phases = if clockwise { CW } else { CCW };
    for (a, b) in phases {
        enc.on_edge(a, b);
    }
}

proptest::proptest! {
    /// Net steps equal clockwise detents minus counter-clockwise detents.
    #[test]
    fn net_steps_match_detents(moves in proptest::collection::vec(proptest::bool::ANY, 1..64)) {
        let enc = RotaryEncoder::new();
        let mut expected = 0i32;
        for &cw in &moves {
            turn(&enc, cw);
            expected += if cw { 1 } else { -1 };
        }
        let last_cw = *moves.last().unwrap();
        let turned = enc.take().unwrap();
        assert_eq!(turned.steps, expected);
        let want = if last_cw { RotaryDirection::Increment } else { RotaryDirection::Decrement };
        assert_eq!(turned.direction, want);
        assert_eq!(enc.take(), None, "movement must be consumed by one take");
    }

    /// Arbitrary line noise never panics and never leaves more than the
    /// edges could possibly encode.
    #[test]
    fn arbitrary_edges_never_panic(edges in proptest::collection::vec((proptest::bool::ANY, proptest::bool::ANY), 0..256)) {
        let enc = RotaryEncoder::new();
        for &(a, b) in &edges {
            enc.on_edge(a, b);
        }
        let steps = enc.pending_steps();
        assert!(steps.unsigned_abs() as usize <= edges.len() / 2);
    }

    /// A half detent (two quarter steps then back) registers nothing.
    #[test]
    fn reversed_half_turn_is_ignored(repeats in 1usize..16) {
        let enc = RotaryEncoder::new();
        for _ in 0..repeats {
            enc.on_edge(true, false);
            enc.on_edge(false, false);
            enc.on_edge(true, false);
            enc.on_edge(true, true);
        }
        assert_eq!(enc.take(), None);
    }
}
