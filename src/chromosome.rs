//! Chromosome representation and validation.

use crate::error::Error;

/// A chromosome with its resident base sequence.
#[derive(Debug, Clone)]
pub struct Chromosome {
    pub name: String,
    pub length: u32,
    sequence: Vec<u8>,
}

impl Chromosome {
    /// Create a chromosome from raw bases. Bases are uppercased.
    pub fn new(name: impl Into<String>, mut sequence: Vec<u8>) -> Result<Self, Error> {
        let name = name.into();
        let length = u32::try_from(sequence.len()).map_err(|_| {
            Error::Validation(format!(
                "chromosome {name} is longer than {} bases",
                u32::MAX
            ))
        })?;
        sequence.make_ascii_uppercase();
        let chr = Self {
            name,
            length,
            sequence,
        };
        chr.validate()?;
        Ok(chr)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.name.is_empty() {
            return Err(Error::Validation("chromosome has no name".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    /// Bases in the half-open range `[start, end)`, or None if out of bounds.
    #[must_use]
    pub fn slice(&self, start: u32, end: u32) -> Option<&[u8]> {
        if start > end || end > self.length {
            return None;
        }
        Some(&self.sequence[start as usize..end as usize])
    }

    /// Mitochondrial chromosomes use the vertebrate mitochondrial codon table.
    #[must_use]
    pub fn is_mitochondrial(&self) -> bool {
        matches!(self.name.as_str(), "MT" | "M" | "chrM" | "chrMT")
    }
}
