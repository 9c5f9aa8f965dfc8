//! Codon translation (standard and vertebrate mitochondrial genetic codes).

use crate::chromosome::Chromosome;

/// Amino acids for all 64 codons, indexed by 2-bit base codes A=0, C=1, G=2, T/U=3
/// (index = first*16 + second*4 + third).
const STANDARD_CODE: &[u8; 64] =
    b"KNKNTTTTRSRSIIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVV*Y*YSSSS*CWCLFLF";

/// Vertebrate mitochondrial code (NCBI table 2): TGA=W, AGA/AGG=*, ATA=M.
const MITOCHONDRIAL_CODE: &[u8; 64] =
    b"KNKNTTTT*S*SMIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVV*Y*YSSSSWCWCLFLF";

/// Lookup table for translating codons to amino acids.
#[derive(Debug, Clone, Copy)]
pub struct CodonTable {
    table: &'static [u8; 64],
    mitochondrial: bool,
}

fn base_code(b: u8) -> Option<usize> {
    match b {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' | b'U' | b'u' => Some(3),
        _ => None,
    }
}

fn codon_index(codon: &[u8]) -> Option<usize> {
    match codon {
        [a, b, c, ..] => Some(base_code(*a)? * 16 + base_code(*b)? * 4 + base_code(*c)?),
        _ => None,
    }
}

impl CodonTable {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            table: STANDARD_CODE,
            mitochondrial: false,
        }
    }

    #[must_use]
    pub fn mitochondrial() -> Self {
        Self {
            table: MITOCHONDRIAL_CODE,
            mitochondrial: true,
        }
    }

    /// Table used for transcripts located on `chromosome`.
    #[must_use]
    pub fn for_chromosome(chromosome: &Chromosome) -> Self {
        if chromosome.is_mitochondrial() {
            Self::mitochondrial()
        } else {
            Self::standard()
        }
    }

    /// Translate a single codon; incomplete or ambiguous codons become `X`.
    #[must_use]
    pub fn translate_codon(&self, codon: &[u8]) -> u8 {
        codon_index(codon).map_or(b'X', |i| self.table[i])
    }

    #[must_use]
    pub fn is_stop_codon(&self, codon: &[u8]) -> bool {
        self.translate_codon(codon) == b'*'
    }

    /// ATG everywhere; the mitochondrial code also initiates on ATA, ATT and GTG.
    #[must_use]
    pub fn is_start_codon(&self, codon: &[u8]) -> bool {
        let Some(i) = codon_index(codon) else {
            return false;
        };
        match i {
            14 => true,
            12 | 15 | 46 => self.mitochondrial,
            _ => false,
        }
    }
}

/// Translate a CDS into a protein; a trailing partial codon yields `X`.
#[must_use]
pub fn translate(cds: &[u8], table: &CodonTable) -> Vec<u8> {
    cds.chunks(3).map(|codon| table.translate_codon(codon)).collect()
}
