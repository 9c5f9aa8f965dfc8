//! Transcript biotypes (Ensembl / GENCODE vocabulary plus the RefSeq `mRNA` term).

use std::fmt;

use crate::error::Error;

/// Broad class of a transcript biotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BioTypeCategory {
    Coding,
    NonCoding,
    Pseudogene,
}

/// Recognized transcript biotypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BioType {
    ProteinCoding,
    MRna,
    NonsenseMediatedDecay,
    NonStopDecay,
    IgCGene,
    IgDGene,
    IgJGene,
    IgVGene,
    TrCGene,
    TrDGene,
    TrJGene,
    TrVGene,
    PolymorphicPseudogene,
    LncRna,
    MiRna,
    MiscRna,
    RetainedIntron,
    ProcessedTranscript,
    RRna,
    SnoRna,
    SnRna,
    ProcessedPseudogene,
    UnprocessedPseudogene,
    Pseudogene,
}

impl BioType {
    #[must_use]
    pub fn category(self) -> BioTypeCategory {
        match self {
            Self::ProteinCoding
            | Self::MRna
            | Self::NonsenseMediatedDecay
            | Self::NonStopDecay
            | Self::IgCGene
            | Self::IgDGene
            | Self::IgJGene
            | Self::IgVGene
            | Self::TrCGene
            | Self::TrDGene
            | Self::TrJGene
            | Self::TrVGene
            | Self::PolymorphicPseudogene => BioTypeCategory::Coding,

            Self::LncRna
            | Self::MiRna
            | Self::MiscRna
            | Self::RetainedIntron
            | Self::ProcessedTranscript
            | Self::RRna
            | Self::SnoRna
            | Self::SnRna => BioTypeCategory::NonCoding,

            Self::ProcessedPseudogene | Self::UnprocessedPseudogene | Self::Pseudogene => {
                BioTypeCategory::Pseudogene
            }
        }
    }

    /// Returns true for biotypes whose transcripts are translated.
    #[must_use]
    pub fn is_coding(self) -> bool {
        self.category() == BioTypeCategory::Coding
    }
}

impl std::str::FromStr for BioType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "protein_coding" => Ok(Self::ProteinCoding),
            "mRNA" => Ok(Self::MRna),
            "nonsense_mediated_decay" => Ok(Self::NonsenseMediatedDecay),
            "non_stop_decay" => Ok(Self::NonStopDecay),
            "IG_C_gene" => Ok(Self::IgCGene),
            "IG_D_gene" => Ok(Self::IgDGene),
            "IG_J_gene" => Ok(Self::IgJGene),
            "IG_V_gene" => Ok(Self::IgVGene),
            "TR_C_gene" => Ok(Self::TrCGene),
            "TR_D_gene" => Ok(Self::TrDGene),
            "TR_J_gene" => Ok(Self::TrJGene),
            "TR_V_gene" => Ok(Self::TrVGene),
            "polymorphic_pseudogene" => Ok(Self::PolymorphicPseudogene),
            // lincRNA was merged into lncRNA by GENCODE
            "lncRNA" | "lincRNA" | "lnc_RNA" => Ok(Self::LncRna),
            "miRNA" => Ok(Self::MiRna),
            "misc_RNA" => Ok(Self::MiscRna),
            "retained_intron" => Ok(Self::RetainedIntron),
            "processed_transcript" => Ok(Self::ProcessedTranscript),
            "rRNA" => Ok(Self::RRna),
            "snoRNA" => Ok(Self::SnoRna),
            "snRNA" => Ok(Self::SnRna),
            "processed_pseudogene" => Ok(Self::ProcessedPseudogene),
            "unprocessed_pseudogene" => Ok(Self::UnprocessedPseudogene),
            "pseudogene" => Ok(Self::Pseudogene),
            _ => Err(Error::Parse(format!("unrecognized biotype: '{s}'"))),
        }
    }
}

impl fmt::Display for BioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ProteinCoding => "protein_coding",
            Self::MRna => "mRNA",
            Self::NonsenseMediatedDecay => "nonsense_mediated_decay",
            Self::NonStopDecay => "non_stop_decay",
            Self::IgCGene => "IG_C_gene",
            Self::IgDGene => "IG_D_gene",
            Self::IgJGene => "IG_J_gene",
            Self::IgVGene => "IG_V_gene",
            Self::TrCGene => "TR_C_gene",
            Self::TrDGene => "TR_D_gene",
            Self::TrJGene => "TR_J_gene",
            Self::TrVGene => "TR_V_gene",
            Self::PolymorphicPseudogene => "polymorphic_pseudogene",
            Self::LncRna => "lncRNA",
            Self::MiRna => "miRNA",
            Self::MiscRna => "misc_RNA",
            Self::RetainedIntron => "retained_intron",
            Self::ProcessedTranscript => "processed_transcript",
            Self::RRna => "rRNA",
            Self::SnoRna => "snoRNA",
            Self::SnRna => "snRNA",
            Self::ProcessedPseudogene => "processed_pseudogene",
            Self::UnprocessedPseudogene => "unprocessed_pseudogene",
            Self::Pseudogene => "pseudogene",
        };
        write!(f, "{s}")
    }
}
