//! Augmented interval tree laid out implicitly over a sorted array.
//!
//! Entries are sorted by `(start, end)` with ties kept in insertion order. The
//! node covering `entries[lo..hi]` sits at `mid = lo + (hi - lo) / 2`, and
//! `max_end[mid]` is the largest end coordinate of that range. Queries descend
//! the implicit tree and prune subtrees whose `max_end` cannot reach the query.

/// One indexed interval `[start, end)` and its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry<T> {
    pub start: u32,
    pub end: u32,
    pub value: T,
}

#[derive(Debug, Clone)]
pub struct IntervalTree<T> {
    entries: Vec<TreeEntry<T>>,
    max_end: Vec<u32>,
}

impl<T> Default for IntervalTree<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            max_end: Vec::new(),
        }
    }
}

impl<T> IntervalTree<T> {
    /// Sort the entries and compute the subtree maxima. O(n log n).
    #[must_use]
    pub fn new(mut entries: Vec<TreeEntry<T>>) -> Self {
        // stable: equal coordinates keep insertion order
        entries.sort_by_key(|e| (e.start, e.end));
        let mut max_end = vec![0; entries.len()];
        fill_max_end(&entries, &mut max_end, 0, entries.len());
        Self { entries, max_end }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in sorted order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TreeEntry<T>> {
        self.entries.iter()
    }

    /// Every entry with `entry.start < end && start < entry.end`, in sorted
    /// order. An empty query range matches nothing.
    #[must_use]
    pub fn query_overlap(&self, start: u32, end: u32) -> Vec<&TreeEntry<T>> {
        let mut hits = Vec::new();
        if start < end {
            self.collect_overlaps(0, self.entries.len(), start, end, &mut hits);
        }
        hits
    }

    /// Every entry with `entry.start <= point < entry.end`, in sorted order.
    #[must_use]
    pub fn query_containing(&self, point: u32) -> Vec<&TreeEntry<T>> {
        match point.checked_add(1) {
            Some(next) => self.query_overlap(point, next),
            // no half-open u32 interval can contain u32::MAX
            None => Vec::new(),
        }
    }

    fn collect_overlaps<'a>(
        &'a self,
        lo: usize,
        hi: usize,
        start: u32,
        end: u32,
        hits: &mut Vec<&'a TreeEntry<T>>,
    ) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        if self.max_end[mid] <= start {
            return;
        }
        self.collect_overlaps(lo, mid, start, end, hits);

        let entry = &self.entries[mid];
        if entry.start >= end {
            // everything to the right starts at or after this entry
            return;
        }
        if start < entry.end {
            hits.push(entry);
        }
        self.collect_overlaps(mid + 1, hi, start, end, hits);
    }
}

fn fill_max_end<T>(entries: &[TreeEntry<T>], max_end: &mut [u32], lo: usize, hi: usize) -> u32 {
    if lo >= hi {
        return 0;
    }
    let mid = lo + (hi - lo) / 2;
    let left = fill_max_end(entries, max_end, lo, mid);
    let right = fill_max_end(entries, max_end, mid + 1, hi);
    let max = entries[mid].end.max(left).max(right);
    max_end[mid] = max;
    max
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(ranges: &[(u32, u32)]) -> IntervalTree<usize> {
        IntervalTree::new(
            ranges
                .iter()
                .enumerate()
                .map(|(i, &(start, end))| TreeEntry { start, end, value: i })
                .collect(),
        )
    }

    fn values(hits: &[&TreeEntry<usize>]) -> Vec<usize> {
        hits.iter().map(|e| e.value).collect()
    }

    #[test]
    fn empty_tree() {
        let t = tree(&[]);
        assert!(t.is_empty());
        assert!(t.query_overlap(0, 100).is_empty());
        assert!(t.query_containing(5).is_empty());
    }

    #[test]
    fn half_open_boundaries() {
        let t = tree(&[(10, 20), (20, 30), (0, 10)]);
        assert_eq!(values(&t.query_overlap(19, 21)), vec![0, 1]);
        assert_eq!(values(&t.query_overlap(10, 20)), vec![0]);
        assert_eq!(values(&t.query_containing(10)), vec![0]);
        assert_eq!(values(&t.query_containing(9)), vec![2]);
        assert!(t.query_containing(30).is_empty());
    }

    #[test]
    fn empty_query_range_matches_nothing() {
        let t = tree(&[(0, 100)]);
        assert!(t.query_overlap(50, 50).is_empty());
        assert!(t.query_overlap(60, 50).is_empty());
    }

    #[test]
    fn long_interval_found_through_pruning() {
        // the long interval sorts first and must still be found far to the right
        let mut ranges = vec![(0, 1000)];
        ranges.extend((1..50).map(|i| (i * 10, i * 10 + 5)));
        let t = tree(&ranges);
        assert_eq!(values(&t.query_containing(997)), vec![0]);
        assert_eq!(values(&t.query_containing(492)), vec![0, 49]);
    }

    #[test]
    fn duplicates_keep_insertion_order() {
        let t = tree(&[(5, 10), (5, 10), (1, 3), (5, 10)]);
        assert_eq!(values(&t.query_overlap(6, 7)), vec![0, 1, 3]);
        assert_eq!(t.len(), 4);
        let starts: Vec<u32> = t.iter().map(|e| e.start).collect();
        assert_eq!(starts, vec![1, 5, 5, 5]);
    }

    #[test]
    fn matches_linear_scan() {
        let ranges: Vec<(u32, u32)> = (0..200u32)
            .map(|i| {
                let start = (i * 37) % 500;
                (start, start + (i * 13) % 60)
            })
            .collect();
        let t = tree(&ranges);
        for (qs, qe) in [(0, 10), (100, 101), (250, 400), (490, 600), (33, 34)] {
            let mut expected: Vec<usize> = ranges
                .iter()
                .enumerate()
                .filter(|&(_, &(s, e))| s < qe && qs < e)
                .map(|(i, _)| i)
                .collect();
            let mut got = values(&t.query_overlap(qs, qe));
            expected.sort_unstable();
            got.sort_unstable();
            assert_eq!(got, expected, "query [{qs}, {qe})");
        }
    }
}
