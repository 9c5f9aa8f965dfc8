//! Strand-aware sequence assembly: spliced mRNA, CDS, UTRs and protein.
//!
//! Every sequence is built the same way: the bases of each piece are read from
//! the chromosome, reverse-complemented individually on the reverse strand, and
//! concatenated in transcription order.

use crate::chromosome::Chromosome;
use crate::codon::{self, CodonTable};
use crate::error::Error;
use crate::feature::types::{RegionKind, SubRegion, Transcript};
use crate::genome::Genome;
use crate::interval::Interval;
use crate::sequence::Sequence;

/// Spliced mRNA of a transcript. A transcript without exons yields an empty sequence.
pub fn mrna(genome: &Genome, transcript: &Transcript) -> Result<Sequence, Error> {
    mrna_from(genome.chromosome_of(transcript)?, transcript)
}

pub fn mrna_from(chromosome: &Chromosome, transcript: &Transcript) -> Result<Sequence, Error> {
    let exons = transcript.exons_in_transcription_order();
    splice(chromosome, exons.iter().map(|e| &e.interval))
}

/// Coding sequence; empty for non-coding transcripts.
pub fn cds(genome: &Genome, transcript: &Transcript) -> Result<Sequence, Error> {
    cds_from(genome.chromosome_of(transcript)?, transcript)
}

pub fn cds_from(chromosome: &Chromosome, transcript: &Transcript) -> Result<Sequence, Error> {
    regions_from(chromosome, transcript, RegionKind::Cds)
}

/// All 5' UTR pieces concatenated in transcription order.
pub fn utr5(genome: &Genome, transcript: &Transcript) -> Result<Sequence, Error> {
    regions_from(genome.chromosome_of(transcript)?, transcript, RegionKind::Utr5)
}

/// All 3' UTR pieces concatenated in transcription order.
pub fn utr3(genome: &Genome, transcript: &Transcript) -> Result<Sequence, Error> {
    regions_from(genome.chromosome_of(transcript)?, transcript, RegionKind::Utr3)
}

/// Bases of a single sub-region, reverse-complemented on the reverse strand.
pub fn utr_sequence(genome: &Genome, region: &SubRegion) -> Result<Sequence, Error> {
    let chromosome = genome
        .chromosome(region.interval.chromosome_index)
        .ok_or_else(|| {
            Error::Validation(format!(
                "region {} refers to an unknown chromosome",
                region.interval
            ))
        })?;
    splice(chromosome, std::iter::once(&region.interval))
}

/// Translate the CDS with the codon table of the transcript's chromosome.
pub fn protein(genome: &Genome, transcript: &Transcript) -> Result<Vec<u8>, Error> {
    let chromosome = genome.chromosome_of(transcript)?;
    let cds = cds_from(chromosome, transcript)?;
    Ok(codon::translate(
        cds.as_bytes(),
        &CodonTable::for_chromosome(chromosome),
    ))
}

fn regions_from(
    chromosome: &Chromosome,
    transcript: &Transcript,
    kind: RegionKind,
) -> Result<Sequence, Error> {
    let regions = transcript.regions(kind);
    splice(chromosome, regions.iter().map(|r| &r.interval))
}

/// Concatenate pieces that are already in transcription order.
fn splice<'a>(
    chromosome: &Chromosome,
    pieces: impl Iterator<Item = &'a Interval>,
) -> Result<Sequence, Error> {
    let mut seq = Sequence::new();
    for interval in pieces {
        let bases = chromosome.slice(interval.start, interval.end).ok_or_else(|| {
            Error::Validation(format!(
                "[{}, {}) is outside {} ({} bases)",
                interval.start, interval.end, chromosome.name, chromosome.length
            ))
        })?;
        if interval.strand.is_reverse() {
            seq.push_reverse_complement(bases);
        } else {
            seq.push_bases(bases);
        }
    }
    Ok(seq)
}
