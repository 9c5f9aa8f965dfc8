//! Nucleotide sequences assembled from chromosome bases.

use std::fmt;

/// An owned nucleotide sequence over {A, C, G, T, N}, normalized on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    bases: Vec<u8>,
}

impl Sequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bases: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn from_bases(bases: &[u8]) -> Self {
        let mut seq = Self::with_capacity(bases.len());
        seq.push_bases(bases);
        seq
    }

    /// Append forward-strand bases. Ambiguity codes become N, U becomes T.
    pub fn push_bases(&mut self, bases: &[u8]) {
        self.bases.reserve(bases.len());
        self.bases.extend(bases.iter().map(|&b| normalize(b)));
    }

    /// Append the reverse complement of `bases`.
    pub fn push_reverse_complement(&mut self, bases: &[u8]) {
        self.bases.reserve(bases.len());
        self.bases.extend(bases.iter().rev().map(|&b| complement(b)));
    }

    pub fn append(&mut self, other: &Sequence) {
        self.bases.extend_from_slice(&other.bases);
    }

    #[must_use]
    pub fn reverse_complement(&self) -> Sequence {
        let mut rc = Sequence::with_capacity(self.bases.len());
        rc.push_reverse_complement(&self.bases);
        rc
    }

    /// Case-insensitive prefix test.
    #[must_use]
    pub fn starts_with(&self, prefix: &Sequence) -> bool {
        self.starts_with_bases(&prefix.bases)
    }

    #[must_use]
    pub fn starts_with_bases(&self, prefix: &[u8]) -> bool {
        prefix.len() <= self.bases.len() && self.bases[..prefix.len()].eq_ignore_ascii_case(prefix)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bases
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    #[must_use]
    pub fn to_lowercase(&self) -> String {
        String::from_utf8_lossy(&self.bases).to_ascii_lowercase()
    }
}

/// Upper-case base in {A, C, G, T, N}.
#[must_use]
pub fn normalize(base: u8) -> u8 {
    match base {
        b'A' | b'a' => b'A',
        b'C' | b'c' => b'C',
        b'G' | b'g' => b'G',
        b'T' | b't' | b'U' | b'u' => b'T',
        _ => b'N',
    }
}

/// Watson-Crick complement of one base; anything that is not ACGT becomes N.
#[must_use]
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' | b'a' => b'T',
        b'C' | b'c' => b'G',
        b'G' | b'g' => b'C',
        b'T' | b't' | b'U' | b'u' => b'A',
        _ => b'N',
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.bases))
    }
}

impl From<&str> for Sequence {
    fn from(s: &str) -> Self {
        Self::from_bases(s.as_bytes())
    }
}
