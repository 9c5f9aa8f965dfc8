//! Gene, transcript and exon records of the feature hierarchy.

use std::fmt;

use crate::biotype::BioType;
use crate::interval::Interval;
use crate::strand::Strand;

/// Handle of a gene in the hierarchy arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeneId(pub usize);

/// Handle of a transcript in the hierarchy arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TranscriptId(pub usize);

/// Kind of an exon sub-region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Utr5,
    Cds,
    Utr3,
}

/// A UTR or CDS piece of one exon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubRegion {
    pub kind: RegionKind,
    pub interval: Interval,
}

/// An exon with its UTR/CDS partition.
///
/// `regions` is in genomic order and, for coding transcripts, tiles the exon
/// without gaps. Non-coding transcripts have no sub-regions.
#[derive(Debug, Clone)]
pub struct Exon {
    pub interval: Interval,
    /// 1-based position in transcription order.
    pub rank: u16,
    pub regions: Vec<SubRegion>,
}

/// Annotation problem recorded while a transcript was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationIssue {
    OverlappingExons,
    CdsOutsideExons,
    DiscontiguousCds,
    MissingCds,
    CdsLengthNotMultipleOfThree,
    MissingStartCodon,
    MissingStopCodon,
    PrematureStopCodon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl AnnotationIssue {
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::OverlappingExons | Self::CdsOutsideExons | Self::DiscontiguousCds => {
                Severity::Error
            }
            Self::MissingCds
            | Self::CdsLengthNotMultipleOfThree
            | Self::MissingStartCodon
            | Self::MissingStopCodon
            | Self::PrematureStopCodon => Severity::Warning,
        }
    }
}

impl fmt::Display for AnnotationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OverlappingExons => "exons overlap",
            Self::CdsOutsideExons => "CDS segment outside exons",
            Self::DiscontiguousCds => "CDS does not cover the coding span of its exons",
            Self::MissingCds => "coding biotype without CDS",
            Self::CdsLengthNotMultipleOfThree => "CDS length is not a multiple of 3",
            Self::MissingStartCodon => "no start codon",
            Self::MissingStopCodon => "no stop codon",
            Self::PrematureStopCodon => "in-frame stop codon before the end of the CDS",
        };
        write!(f, "{s}")
    }
}

/// Gene record in the hierarchy.
#[derive(Debug, Clone)]
pub struct Gene {
    pub id: String,
    pub symbol: Option<String>,
    /// Span of all transcripts; zero-length when the gene has none.
    pub interval: Interval,
    pub(crate) transcripts: Vec<TranscriptId>,
}

impl Gene {
    #[must_use]
    pub fn transcript_ids(&self) -> &[TranscriptId] {
        &self.transcripts
    }

    #[must_use]
    pub fn strand(&self) -> Strand {
        self.interval.strand
    }
}

/// Transcript record in the hierarchy.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub id: String,
    pub gene: GeneId,
    /// Span of all exons; zero-length when the transcript has none.
    pub interval: Interval,
    pub biotype: Option<BioType>,
    pub(crate) protein_coding: bool,
    /// Exons in ascending genomic order.
    pub(crate) exons: Vec<Exon>,
    pub(crate) issues: Vec<AnnotationIssue>,
}

impl Transcript {
    #[must_use]
    pub fn strand(&self) -> Strand {
        self.interval.strand
    }

    #[must_use]
    pub fn chromosome_index(&self) -> usize {
        self.interval.chromosome_index
    }

    #[must_use]
    pub fn is_protein_coding(&self) -> bool {
        self.protein_coding
    }

    /// Exons in genomic order.
    #[must_use]
    pub fn exons(&self) -> &[Exon] {
        &self.exons
    }

    /// Exons in transcription (5'→3') order: ascending start on the forward
    /// strand, descending start on the reverse strand.
    #[must_use]
    pub fn exons_in_transcription_order(&self) -> Vec<&Exon> {
        let mut exons: Vec<&Exon> = self.exons.iter().collect();
        if self.strand().is_reverse() {
            exons.reverse();
        }
        exons
    }

    /// Sub-regions of one kind in transcription order.
    #[must_use]
    pub fn regions(&self, kind: RegionKind) -> Vec<&SubRegion> {
        let mut regions: Vec<&SubRegion> = self
            .exons
            .iter()
            .flat_map(|e| e.regions.iter())
            .filter(|r| r.kind == kind)
            .collect();
        if self.strand().is_reverse() {
            regions.reverse();
        }
        regions
    }

    #[must_use]
    pub fn utrs5(&self) -> Vec<&SubRegion> {
        self.regions(RegionKind::Utr5)
    }

    #[must_use]
    pub fn utrs3(&self) -> Vec<&SubRegion> {
        self.regions(RegionKind::Utr3)
    }

    #[must_use]
    pub fn cds_intervals(&self) -> Vec<&SubRegion> {
        self.regions(RegionKind::Cds)
    }

    /// Genomic span `[start, end)` of the coding region, if any.
    #[must_use]
    pub fn coding_span(&self) -> Option<(u32, u32)> {
        let cds = self.cds_intervals();
        let start = cds.iter().map(|r| r.interval.start).min()?;
        let end = cds.iter().map(|r| r.interval.end).max()?;
        Some((start, end))
    }

    #[must_use]
    pub fn issues(&self) -> &[AnnotationIssue] {
        &self.issues
    }

    #[must_use]
    pub fn has_error_or_warning(&self) -> bool {
        !self.issues.is_empty()
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.issues.iter().any(|i| i.severity() == Severity::Error)
    }
}
