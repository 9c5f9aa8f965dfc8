//! Half-open genomic intervals.

use std::fmt;

use crate::error::Error;
use crate::strand::Strand;

/// A 0-based, half-open range `[start, end)` on one chromosome.
///
/// Outside this crate an interval can only be made through [`Interval::new`],
/// which keeps `start <= end`:
///
/// ```compile_fail
/// use annoforest::interval::Interval;
/// use annoforest::strand::Strand;
///
/// let iv = Interval { chromosome_index: 0, start: 10, end: 5, strand: Strand::Forward };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct Interval {
    pub chromosome_index: usize,
    pub start: u32,
    pub end: u32,
    pub strand: Strand,
}

impl Interval {
    pub fn new(chromosome_index: usize, start: u32, end: u32, strand: Strand) -> Result<Self, Error> {
        if start > end {
            return Err(Error::Validation(format!(
                "interval start {start} is greater than end {end}"
            )));
        }
        Ok(Self {
            chromosome_index,
            start,
            end,
            strand,
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Zero-length intervals are markers only and never indexed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True when both ranges share at least one base on the same chromosome.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.chromosome_index == other.chromosome_index
            && self.overlaps_range(other.start, other.end)
    }

    #[inline]
    #[must_use]
    pub fn overlaps_range(&self, start: u32, end: u32) -> bool {
        self.start < end && start < self.end
    }

    #[inline]
    #[must_use]
    pub fn contains_point(&self, pos: u32) -> bool {
        self.start <= pos && pos < self.end
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, other: &Interval) -> bool {
        self.chromosome_index == other.chromosome_index
            && self.start <= other.start
            && other.end <= self.end
    }

    /// Returns the shared part of both ranges, or None if they do not overlap.
    #[must_use]
    pub fn intersect(&self, start: u32, end: u32) -> Option<(u32, u32)> {
        let s = self.start.max(start);
        let e = self.end.min(end);
        (s < e).then_some((s, e))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:[{}, {}) {}",
            self.chromosome_index, self.start, self.end, self.strand
        )
    }
}
