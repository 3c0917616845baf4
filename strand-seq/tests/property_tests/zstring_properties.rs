//! Property-based tests for Unicode string values
//!
//! This module tests the value-level laws the rest of the theory relies on:
//! - Lossless encode/decode round-tripping for every representable value
//! - Concatenation associativity and length arithmetic
//! - Extraction length law
//! - Search/containment consistency

use proptest::prelude::*;
use strand_seq::{ZString, MAX_CHAR};

/// Strategy for arbitrary representable code-point buffers.
fn code_points_strategy() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(0..=MAX_CHAR, 0..24)
}

fn zstr(points: &[u32]) -> ZString {
    ZString::from_code_points(points).expect("in-range code points")
}

proptest! {
    /// decode(encode(s)) == s for every representable code-point sequence.
    #[test]
    fn encode_decode_round_trip(points in code_points_strategy()) {
        let value = zstr(&points);
        let decoded = ZString::parse(&value.encode()).expect("well-formed encoding");
        prop_assert_eq!(decoded, value);
    }

    /// Concatenation is associative at the value level.
    #[test]
    fn concat_associative(
        a in code_points_strategy(),
        b in code_points_strategy(),
        c in code_points_strategy(),
    ) {
        let (a, b, c) = (zstr(&a), zstr(&b), zstr(&c));
        prop_assert_eq!(a.concat(&b).concat(&c), a.concat(&b.concat(&c)));
    }

    /// Concatenation adds lengths.
    #[test]
    fn concat_length(a in code_points_strategy(), b in code_points_strategy()) {
        let (a, b) = (zstr(&a), zstr(&b));
        prop_assert_eq!(a.concat(&b).len(), a.len() + b.len());
    }

    /// extract(s, lo, hi) has length max(0, min(hi, len) - lo).
    #[test]
    fn extract_length_law(
        points in code_points_strategy(),
        lo in 0usize..32,
        hi in 0usize..32,
    ) {
        let s = zstr(&points);
        let expected = hi.min(s.len()).saturating_sub(lo);
        prop_assert_eq!(s.extract(lo, hi).len(), expected);
    }

    /// A prefix and a suffix of a concatenation are found where expected.
    #[test]
    fn concat_prefix_suffix(a in code_points_strategy(), b in code_points_strategy()) {
        let (a, b) = (zstr(&a), zstr(&b));
        let ab = a.concat(&b);
        prop_assert!(a.prefix_of(&ab));
        prop_assert!(b.suffix_of(&ab));
        prop_assert!(ab.contains(&a));
        prop_assert!(ab.contains(&b));
    }

    /// index_of finds an occurrence wherever contains reports one.
    #[test]
    fn index_of_consistent_with_contains(
        hay in code_points_strategy(),
        needle in code_points_strategy(),
    ) {
        let (hay, needle) = (zstr(&hay), zstr(&needle));
        let at = hay.index_of(&needle, 0);
        prop_assert_eq!(at >= 0, hay.contains(&needle));
        if at >= 0 {
            let at = at as usize;
            prop_assert_eq!(hay.extract(at, at + needle.len()), needle.clone());
            prop_assert!(hay.last_index_of(&needle) >= at as i64);
        }
    }

    /// Reverse is an involution.
    #[test]
    fn reverse_involution(points in code_points_strategy()) {
        let s = zstr(&points);
        prop_assert_eq!(s.reverse().reverse(), s);
    }
}
