//! Loads a [`Genome`] from a FASTA file and a JSON feature table.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;
use crate::fasta;
use crate::feature::builder::GeneRecord;
use crate::genome::Genome;

/// JSON feature table: `{ "genes": [ ... ] }` with 0-based, half-open coordinates.
#[derive(Debug, Deserialize)]
pub struct FeatureTable {
    pub genes: Vec<GeneRecord>,
}

impl FeatureTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let table = Self::from_reader(BufReader::new(File::open(path)?))?;
        log::debug!(
            "read {} genes from {}",
            table.genes.len(),
            path.display()
        );
        Ok(table)
    }
}

/// Read chromosomes and annotations and build the feature hierarchy.
pub fn load_genome(name: &str, fasta_path: &Path, annotations_path: &Path) -> Result<Genome, Error> {
    let chromosomes = fasta::read_chromosomes(fasta_path)?;
    let table = FeatureTable::from_file(annotations_path)?;
    Genome::new(name, chromosomes, table.genes)
}
