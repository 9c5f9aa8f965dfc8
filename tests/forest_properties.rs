//! Property-based tests for the interval tree and forest query laws.

use annoforest::forest::{IntervalTree, TreeEntry};
use annoforest::sequence::Sequence;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

// =============================================================================
// Strategies
// =============================================================================

/// Intervals `[start, end)` on a small coordinate range so that overlaps are common.
fn interval() -> impl Strategy<Value = (u32, u32)> {
    (0..1_000u32, 0..120u32).prop_map(|(start, len)| (start, start + len))
}

fn intervals() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec(interval(), 0..300)
}

fn build(ranges: &[(u32, u32)]) -> IntervalTree<usize> {
    IntervalTree::new(
        ranges
            .iter()
            .enumerate()
            .map(|(i, &(start, end))| TreeEntry { start, end, value: i })
            .collect(),
    )
}

fn ids(hits: &[&TreeEntry<usize>]) -> Vec<usize> {
    hits.iter().map(|e| e.value).collect()
}

/// Any printable byte: bases in both cases, IUPAC codes and garbage.
fn nucleotides() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0x21..0x7fu8, 0..200)
}

// =============================================================================
// Query laws
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every returned entry overlaps the query and every overlapping entry is returned.
    #[test]
    fn overlap_query_matches_linear_scan(ranges in intervals(), query in interval()) {
        let tree = build(&ranges);
        let (qs, qe) = query;
        let mut got = ids(&tree.query_overlap(qs, qe));
        let mut expected: Vec<usize> = ranges
            .iter()
            .enumerate()
            .filter(|&(_, &(s, e))| qs < qe && s < qe && qs < e)
            .map(|(i, _)| i)
            .collect();
        got.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn containing_query_matches_linear_scan(ranges in intervals(), point in 0..1_200u32) {
        let tree = build(&ranges);
        let mut got = ids(&tree.query_containing(point));
        let mut expected: Vec<usize> = ranges
            .iter()
            .enumerate()
            .filter(|&(_, &(s, e))| s <= point && point < e)
            .map(|(i, _)| i)
            .collect();
        got.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);
    }

    /// Repeating a query on the same tree gives the same entries in the same order.
    #[test]
    fn queries_are_idempotent(ranges in intervals(), query in interval()) {
        let tree = build(&ranges);
        let first = ids(&tree.query_overlap(query.0, query.1));
        let second = ids(&tree.query_overlap(query.0, query.1));
        prop_assert_eq!(first, second);
    }

    /// Two trees built from the same input answer every query identically,
    /// and results come back in (start, end, insertion) order.
    #[test]
    fn builds_are_deterministic(ranges in intervals(), query in interval()) {
        let a = build(&ranges);
        let b = build(&ranges);
        let hits_a = ids(&a.query_overlap(query.0, query.1));
        let hits_b = ids(&b.query_overlap(query.0, query.1));
        prop_assert_eq!(&hits_a, &hits_b);

        let keys: Vec<(u32, u32, usize)> = hits_a
            .iter()
            .map(|&i| (ranges[i].0, ranges[i].1, i))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        prop_assert_eq!(keys, sorted);
    }

    /// Reverse complementing twice gives back the normalized sequence, and
    /// every assembled base is one of A, C, G, T or N.
    #[test]
    fn reverse_complement_is_an_involution(bases in nucleotides()) {
        let seq = Sequence::from_bases(&bases);
        prop_assert!(seq.as_bytes().iter().all(|b| b"ACGTN".contains(b)));
        prop_assert_eq!(seq.reverse_complement().reverse_complement(), seq.clone());

        let mut reverse = Sequence::new();
        reverse.push_reverse_complement(&bases);
        prop_assert_eq!(reverse, seq.reverse_complement());
    }
}
