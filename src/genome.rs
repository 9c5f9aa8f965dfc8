//! A loaded genome: chromosome sequences plus the feature hierarchy over them.

use std::collections::HashMap;

use crate::chromosome::Chromosome;
use crate::error::Error;
use crate::feature::FeatureHierarchy;
use crate::feature::builder::{GeneRecord, HierarchyBuilder};
use crate::feature::types::Transcript;

/// Explicit context passed to the assembler, the forest and the checker.
#[derive(Debug)]
pub struct Genome {
    pub name: String,
    chromosomes: Vec<Chromosome>,
    name_to_index: HashMap<String, usize>,
    hierarchy: FeatureHierarchy,
}

impl Genome {
    /// Build the genome; chromosome indices follow the order of `chromosomes`.
    pub fn new(
        name: impl Into<String>,
        chromosomes: Vec<Chromosome>,
        genes: Vec<GeneRecord>,
    ) -> Result<Self, Error> {
        let name = name.into();
        let mut name_to_index = HashMap::with_capacity(chromosomes.len());
        for (i, chr) in chromosomes.iter().enumerate() {
            if name_to_index.insert(chr.name.clone(), i).is_some() {
                return Err(Error::Validation(format!(
                    "duplicate chromosome name: '{}'",
                    chr.name
                )));
            }
        }

        let mut builder = HierarchyBuilder::new(&chromosomes);
        for gene in genes {
            builder.add_gene(gene)?;
        }
        let hierarchy = builder.build();

        log::info!(
            "genome {name}: {} chromosomes, {} genes, {} transcripts",
            chromosomes.len(),
            hierarchy.num_genes(),
            hierarchy.num_transcripts()
        );

        Ok(Self {
            name,
            chromosomes,
            name_to_index,
            hierarchy,
        })
    }

    #[must_use]
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    #[must_use]
    pub fn chromosome(&self, index: usize) -> Option<&Chromosome> {
        self.chromosomes.get(index)
    }

    #[must_use]
    pub fn get_index(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    #[must_use]
    pub fn hierarchy(&self) -> &FeatureHierarchy {
        &self.hierarchy
    }

    pub fn chromosome_of(&self, transcript: &Transcript) -> Result<&Chromosome, Error> {
        self.chromosome(transcript.chromosome_index()).ok_or_else(|| {
            Error::Validation(format!(
                "transcript {} refers to unknown chromosome index {}",
                transcript.id,
                transcript.chromosome_index()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::builder::TranscriptRecord;
    use crate::strand::Strand;

    fn chromosomes() -> Vec<Chromosome> {
        vec![
            Chromosome::new("chr1", b"ACGTACGTAC".to_vec()).unwrap(),
            Chromosome::new("chr2", b"GGGGCCCC".to_vec()).unwrap(),
        ]
    }

    #[test]
    fn lookups() {
        let genes = vec![GeneRecord {
            id: "G1".to_string(),
            symbol: Some("ABC".to_string()),
            chromosome: "chr2".to_string(),
            strand: Strand::Reverse,
            transcripts: vec![TranscriptRecord {
                id: "T1".to_string(),
                biotype: Some("lncRNA".to_string()),
                exons: vec![(1, 6)],
                cds: vec![],
            }],
        }];
        let genome = Genome::new("GRCh38", chromosomes(), genes).unwrap();
        assert_eq!(genome.get_index("chr2"), Some(1));
        assert_eq!(genome.get_index("chr3"), None);
        assert!(genome.chromosome(2).is_none());

        let tx_id = genome.hierarchy().find_transcript("T1").unwrap();
        let tx = genome.hierarchy().transcript(tx_id);
        assert_eq!(genome.chromosome_of(tx).unwrap().name, "chr2");
    }

    #[test]
    fn genes_and_transcripts_iterate_in_load_order() {
        let tx = |id: &str, exons: Vec<(u32, u32)>| TranscriptRecord {
            id: id.to_string(),
            biotype: Some("lncRNA".to_string()),
            exons,
            cds: vec![],
        };
        let gene = |id: &str, chromosome: &str, transcripts| GeneRecord {
            id: id.to_string(),
            symbol: None,
            chromosome: chromosome.to_string(),
            strand: Strand::Forward,
            transcripts,
        };
        // neither id order nor genomic order
        let genes = vec![
            gene("G2", "chr2", vec![tx("T2", vec![(0, 4)])]),
            gene(
                "G1",
                "chr1",
                vec![tx("T1b", vec![(5, 9)]), tx("T1a", vec![(0, 3)])],
            ),
        ];
        let genome = Genome::new("order", chromosomes(), genes).unwrap();
        let h = genome.hierarchy();

        let mut walked = Vec::new();
        for gene in h.genes() {
            walked.push(gene.id.as_str());
            walked.extend(h.transcripts_of(gene).map(|t| t.id.as_str()));
        }
        assert_eq!(walked, vec!["G2", "T2", "G1", "T1b", "T1a"]);

        let flat: Vec<&str> = h.transcripts().map(|(_, t)| t.id.as_str()).collect();
        assert_eq!(flat, vec!["T2", "T1b", "T1a"]);
    }

    #[test]
    fn duplicate_chromosome_names() {
        let mut chrs = chromosomes();
        chrs.push(Chromosome::new("chr1", b"AC".to_vec()).unwrap());
        assert!(Genome::new("dup", chrs, vec![]).is_err());
    }

    #[test]
    fn empty_genome() {
        let genome = Genome::new("empty", vec![], vec![]).unwrap();
        assert!(genome.chromosomes().is_empty());
        assert_eq!(genome.hierarchy().num_genes(), 0);
    }
}
