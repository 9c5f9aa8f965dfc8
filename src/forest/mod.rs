//! The interval forest: one augmented interval tree per chromosome, indexing
//! every gene, transcript and exon of a feature hierarchy.

pub mod tree;

use rayon::prelude::*;

use crate::feature::FeatureHierarchy;
use crate::feature::types::{GeneId, TranscriptId};
use crate::genome::Genome;
use crate::interval::Interval;

pub use tree::{IntervalTree, TreeEntry};

/// Non-owning handle to an indexed feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureRef {
    Gene(GeneId),
    Transcript(TranscriptId),
    /// `index` is the exon's position in genomic order.
    Exon { transcript: TranscriptId, index: usize },
}

impl FeatureRef {
    /// Resolve the handle to the feature's interval.
    #[must_use]
    pub fn interval(self, hierarchy: &FeatureHierarchy) -> Interval {
        match self {
            Self::Gene(id) => hierarchy.gene(id).interval,
            Self::Transcript(id) => hierarchy.transcript(id).interval,
            Self::Exon { transcript, index } => {
                hierarchy.transcript(transcript).exons()[index].interval
            }
        }
    }
}

/// Read-only per-chromosome index; build it again if the hierarchy changes.
#[derive(Debug, Default)]
pub struct IntervalForest {
    trees: Vec<IntervalTree<FeatureRef>>,
}

impl IntervalForest {
    /// Index all non-empty gene, transcript and exon intervals. Trees for
    /// different chromosomes are built in parallel.
    #[must_use]
    pub fn build(hierarchy: &FeatureHierarchy, chromosome_count: usize) -> Self {
        let mut buckets: Vec<Vec<TreeEntry<FeatureRef>>> =
            (0..chromosome_count).map(|_| Vec::new()).collect();
        let mut skipped = 0usize;

        let mut add = |interval: Interval, value: FeatureRef| {
            if interval.is_empty() {
                skipped += 1;
                return;
            }
            match buckets.get_mut(interval.chromosome_index) {
                Some(bucket) => bucket.push(TreeEntry {
                    start: interval.start,
                    end: interval.end,
                    value,
                }),
                None => skipped += 1,
            }
        };

        for gene_id in hierarchy.gene_ids() {
            let gene = hierarchy.gene(gene_id);
            add(gene.interval, FeatureRef::Gene(gene_id));
            for &tx_id in gene.transcript_ids() {
                let transcript = hierarchy.transcript(tx_id);
                add(transcript.interval, FeatureRef::Transcript(tx_id));
                for (index, exon) in transcript.exons().iter().enumerate() {
                    add(
                        exon.interval,
                        FeatureRef::Exon {
                            transcript: tx_id,
                            index,
                        },
                    );
                }
            }
        }

        if skipped > 0 {
            log::debug!("interval forest: skipped {skipped} zero-length or unplaced intervals");
        }

        let trees: Vec<IntervalTree<FeatureRef>> = buckets
            .into_par_iter()
            .enumerate()
            .map(|(i, entries)| {
                if entries.is_empty() {
                    log::debug!("interval forest: chromosome {i} has no features");
                }
                let tree = IntervalTree::new(entries);
                log::debug!("interval forest: chromosome {i}: {} intervals", tree.len());
                tree
            })
            .collect();

        let forest = Self { trees };
        log::info!(
            "interval forest: {} intervals over {} chromosomes",
            forest.len(),
            forest.trees.len()
        );
        forest
    }

    #[must_use]
    pub fn for_genome(genome: &Genome) -> Self {
        Self::build(genome.hierarchy(), genome.chromosomes().len())
    }

    /// Features overlapping `[start, end)` on one chromosome, in sorted order.
    /// Unknown chromosomes and empty ranges give an empty result.
    #[must_use]
    pub fn query_overlap(&self, chromosome_index: usize, start: u32, end: u32) -> Vec<FeatureRef> {
        self.trees.get(chromosome_index).map_or_else(Vec::new, |tree| {
            tree.query_overlap(start, end)
                .into_iter()
                .map(|e| e.value)
                .collect()
        })
    }

    /// Features containing one position.
    #[must_use]
    pub fn query_containing(&self, chromosome_index: usize, point: u32) -> Vec<FeatureRef> {
        self.trees.get(chromosome_index).map_or_else(Vec::new, |tree| {
            tree.query_containing(point)
                .into_iter()
                .map(|e| e.value)
                .collect()
        })
    }

    #[must_use]
    pub fn query_interval(&self, interval: &Interval) -> Vec<FeatureRef> {
        self.query_overlap(interval.chromosome_index, interval.start, interval.end)
    }

    /// Transcripts overlapping a range, without duplicates.
    #[must_use]
    pub fn transcripts_overlapping(
        &self,
        chromosome_index: usize,
        start: u32,
        end: u32,
    ) -> Vec<TranscriptId> {
        self.query_overlap(chromosome_index, start, end)
            .into_iter()
            .filter_map(|f| match f {
                FeatureRef::Transcript(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn tree(&self, chromosome_index: usize) -> Option<&IntervalTree<FeatureRef>> {
        self.trees.get(chromosome_index)
    }

    #[must_use]
    pub fn num_chromosomes(&self) -> usize {
        self.trees.len()
    }

    /// Total number of indexed intervals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.iter().map(IntervalTree::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
