//! annoforest: genomic feature hierarchy, per-chromosome interval forest and
//! strand-aware transcript sequence assembly with a consistency checker.

pub mod error;

pub mod assembly;
pub mod biotype;
pub mod chromosome;
pub mod cli;
pub mod codon;
pub mod config;
pub mod fasta;
pub mod feature;
pub mod forest;
pub mod genome;
pub mod interval;
pub mod loader;
pub mod sequence;
pub mod strand;
pub mod validation;
