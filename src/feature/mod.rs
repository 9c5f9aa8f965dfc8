//! Feature hierarchy: genes own transcripts, transcripts own exons and their
//! UTR/CDS sub-regions. Records live in arenas and refer to each other by handle.

pub mod builder;
pub mod types;

use std::collections::HashMap;

use types::{Gene, GeneId, Transcript, TranscriptId};

/// Read-only gene/transcript arena, built once by [`builder::HierarchyBuilder`].
#[derive(Debug, Default)]
pub struct FeatureHierarchy {
    genes: Vec<Gene>,
    /// Stored in gene load order, then transcript load order.
    transcripts: Vec<Transcript>,
    transcript_index: HashMap<String, TranscriptId>,
}

impl FeatureHierarchy {
    /// Genes in load order.
    pub fn genes(&self) -> impl ExactSizeIterator<Item = &Gene> {
        self.genes.iter()
    }

    pub fn gene_ids(&self) -> impl ExactSizeIterator<Item = GeneId> {
        (0..self.genes.len()).map(GeneId)
    }

    #[must_use]
    pub fn gene(&self, id: GeneId) -> &Gene {
        &self.genes[id.0]
    }

    #[must_use]
    pub fn transcript(&self, id: TranscriptId) -> &Transcript {
        &self.transcripts[id.0]
    }

    /// Transcripts of one gene in load order.
    pub fn transcripts_of<'a>(&'a self, gene: &'a Gene) -> impl Iterator<Item = &'a Transcript> {
        gene.transcripts.iter().map(|&id| self.transcript(id))
    }

    /// All transcripts with their handles, in gene order.
    pub fn transcripts(&self) -> impl ExactSizeIterator<Item = (TranscriptId, &Transcript)> {
        self.transcripts
            .iter()
            .enumerate()
            .map(|(i, tx)| (TranscriptId(i), tx))
    }

    /// Look up a transcript handle by its identifier.
    #[must_use]
    pub fn find_transcript(&self, id: &str) -> Option<TranscriptId> {
        self.transcript_index.get(id).copied()
    }

    #[must_use]
    pub fn num_genes(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn num_transcripts(&self) -> usize {
        self.transcripts.len()
    }
}
