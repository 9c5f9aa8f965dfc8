//! Feature hierarchy builder: validates coordinates, derives each exon's
//! UTR/CDS partition from the CDS segments and records annotation issues.

use std::collections::HashMap;

use serde::Deserialize;

use crate::assembly;
use crate::biotype::BioType;
use crate::chromosome::Chromosome;
use crate::codon::CodonTable;
use crate::error::Error;
use crate::interval::Interval;
use crate::strand::Strand;

use super::FeatureHierarchy;
use super::types::{
    AnnotationIssue, Exon, Gene, GeneId, RegionKind, SubRegion, Transcript, TranscriptId,
};

/// Gene as handed over by the genome loader. Coordinates are 0-based, half-open.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneRecord {
    pub id: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub chromosome: String,
    pub strand: Strand,
    #[serde(default)]
    pub transcripts: Vec<TranscriptRecord>,
}

/// Transcript as handed over by the genome loader.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptRecord {
    pub id: String,
    #[serde(default)]
    pub biotype: Option<String>,
    #[serde(default)]
    pub exons: Vec<(u32, u32)>,
    #[serde(default)]
    pub cds: Vec<(u32, u32)>,
}

/// Builds a [`FeatureHierarchy`] over a fixed set of chromosomes.
pub struct HierarchyBuilder<'a> {
    chromosomes: &'a [Chromosome],
    name_to_index: HashMap<&'a str, usize>,
    gene_ids: HashMap<String, GeneId>,
    hierarchy: FeatureHierarchy,
}

impl<'a> HierarchyBuilder<'a> {
    pub fn new(chromosomes: &'a [Chromosome]) -> Self {
        let name_to_index = chromosomes
            .iter()
            .enumerate()
            .map(|(i, chr)| (chr.name.as_str(), i))
            .collect();
        Self {
            chromosomes,
            name_to_index,
            gene_ids: HashMap::new(),
            hierarchy: FeatureHierarchy::default(),
        }
    }

    /// Add a gene and all of its transcripts.
    pub fn add_gene(&mut self, record: GeneRecord) -> Result<GeneId, Error> {
        let &chromosome_index = self
            .name_to_index
            .get(record.chromosome.as_str())
            .ok_or_else(|| {
                Error::Validation(format!(
                    "gene '{}' is on unknown chromosome '{}'",
                    record.id, record.chromosome
                ))
            })?;
        if self.gene_ids.contains_key(&record.id) {
            return Err(Error::Validation(format!("duplicate gene ID: '{}'", record.id)));
        }

        let chromosomes = self.chromosomes;
        let chromosome = &chromosomes[chromosome_index];
        let gene_id = GeneId(self.hierarchy.genes.len());

        // Build every transcript before touching the arena so a failing gene leaves no trace.
        let mut transcripts: Vec<Transcript> = Vec::with_capacity(record.transcripts.len());
        for tx_record in &record.transcripts {
            if self.hierarchy.transcript_index.contains_key(&tx_record.id)
                || transcripts.iter().any(|t| t.id == tx_record.id)
            {
                return Err(Error::Validation(format!(
                    "duplicate transcript ID: '{}' (gene '{}')",
                    tx_record.id, record.id
                )));
            }
            transcripts.push(build_transcript(
                tx_record,
                gene_id,
                chromosome_index,
                chromosome,
                record.strand,
            )?);
        }

        let interval = span(
            transcripts.iter().map(|t| t.interval),
            chromosome_index,
            record.strand,
        );

        let mut transcript_ids = Vec::with_capacity(transcripts.len());
        for transcript in transcripts {
            let tx_id = TranscriptId(self.hierarchy.transcripts.len());
            self.hierarchy
                .transcript_index
                .insert(transcript.id.clone(), tx_id);
            self.hierarchy.transcripts.push(transcript);
            transcript_ids.push(tx_id);
        }

        self.gene_ids.insert(record.id.clone(), gene_id);
        self.hierarchy.genes.push(Gene {
            id: record.id,
            symbol: record.symbol,
            interval,
            transcripts: transcript_ids,
        });
        Ok(gene_id)
    }

    /// Consume the builder and produce the read-only hierarchy.
    pub fn build(self) -> FeatureHierarchy {
        let flagged = self
            .hierarchy
            .transcripts
            .iter()
            .filter(|t| t.has_error_or_warning())
            .count();
        log::debug!(
            "feature hierarchy: {} genes, {} transcripts ({} with errors or warnings)",
            self.hierarchy.num_genes(),
            self.hierarchy.num_transcripts(),
            flagged
        );
        self.hierarchy
    }
}

fn build_transcript(
    record: &TranscriptRecord,
    gene: GeneId,
    chromosome_index: usize,
    chromosome: &Chromosome,
    strand: Strand,
) -> Result<Transcript, Error> {
    let biotype = match record.biotype.as_deref() {
        Some(s) => match s.parse::<BioType>() {
            Ok(bt) => Some(bt),
            Err(_) => {
                log::warn!("transcript {}: unrecognized biotype '{s}'", record.id);
                None
            }
        },
        None => None,
    };

    let exon_intervals = to_intervals(&record.id, &record.exons, chromosome_index, chromosome, strand)?;
    let mut cds_intervals = to_intervals(&record.id, &record.cds, chromosome_index, chromosome, strand)?;
    cds_intervals.retain(|iv| !iv.is_empty());

    let protein_coding = match biotype {
        Some(bt) => bt.is_coding(),
        None => !cds_intervals.is_empty(),
    };

    let mut issues = Vec::new();
    if exon_intervals.windows(2).any(|w| w[1].start < w[0].end) {
        issues.push(AnnotationIssue::OverlappingExons);
    }

    let coding_span = if !protein_coding {
        None
    } else if cds_intervals.is_empty() {
        issues.push(AnnotationIssue::MissingCds);
        None
    } else {
        let cds_start = cds_intervals.iter().map(|iv| iv.start).min().unwrap_or(0);
        let cds_end = cds_intervals.iter().map(|iv| iv.end).max().unwrap_or(0);
        check_cds_layout(&exon_intervals, &cds_intervals, cds_start, cds_end, &mut issues);
        Some((cds_start, cds_end))
    };

    let num_exons = u16::try_from(exon_intervals.len()).map_err(|_| {
        Error::Validation(format!(
            "transcript {}: {} exons exceed the limit of {}",
            record.id,
            exon_intervals.len(),
            u16::MAX
        ))
    })?;
    let exons: Vec<Exon> = exon_intervals
        .iter()
        .zip(1..=u16::MAX)
        .map(|(&interval, position)| {
            // rank counts from the 5' end
            let rank = if strand.is_reverse() {
                num_exons - position + 1
            } else {
                position
            };
            Exon {
                interval,
                rank,
                regions: coding_span
                    .map(|(s, e)| partition_exon(&interval, s, e))
                    .unwrap_or_default(),
            }
        })
        .collect();

    let mut transcript = Transcript {
        id: record.id.clone(),
        gene,
        interval: span(exon_intervals.iter().copied(), chromosome_index, strand),
        biotype,
        protein_coding,
        exons,
        issues,
    };

    if coding_span.is_some() {
        let cds = assembly::cds_from(chromosome, &transcript)?;
        check_coding_sequence(
            cds.as_bytes(),
            &CodonTable::for_chromosome(chromosome),
            &mut transcript.issues,
        );
    }

    Ok(transcript)
}

/// Convert raw ranges into bounds-checked intervals sorted by genomic start.
fn to_intervals(
    transcript_id: &str,
    ranges: &[(u32, u32)],
    chromosome_index: usize,
    chromosome: &Chromosome,
    strand: Strand,
) -> Result<Vec<Interval>, Error> {
    let mut intervals = ranges
        .iter()
        .map(|&(start, end)| {
            let interval = Interval::new(chromosome_index, start, end, strand)
                .map_err(|e| Error::Validation(format!("transcript {transcript_id}: {e}")))?;
            if end > chromosome.length {
                return Err(Error::Validation(format!(
                    "transcript {transcript_id}: [{start}, {end}) extends past the end of {} ({} bases)",
                    chromosome.name, chromosome.length
                )));
            }
            Ok(interval)
        })
        .collect::<Result<Vec<_>, Error>>()?;
    intervals.sort_by_key(|iv| (iv.start, iv.end));
    Ok(intervals)
}

/// Smallest interval covering all non-empty inputs; zero-length at 0 if there are none.
fn span(intervals: impl Iterator<Item = Interval>, chromosome_index: usize, strand: Strand) -> Interval {
    let (start, end) = intervals
        .filter(|iv| !iv.is_empty())
        .fold(None, |acc: Option<(u32, u32)>, iv| match acc {
            Some((s, e)) => Some((s.min(iv.start), e.max(iv.end))),
            None => Some((iv.start, iv.end)),
        })
        .unwrap_or((0, 0));
    Interval {
        chromosome_index,
        start,
        end,
        strand,
    }
}

/// Every CDS segment must sit inside an exon, and within the coding span the
/// segments must cover each exon exactly.
fn check_cds_layout(
    exons: &[Interval],
    cds: &[Interval],
    cds_start: u32,
    cds_end: u32,
    issues: &mut Vec<AnnotationIssue>,
) {
    if cds.iter().any(|c| !exons.iter().any(|e| e.contains(c))) {
        issues.push(AnnotationIssue::CdsOutsideExons);
    }

    let discontiguous = exons.iter().any(|exon| {
        let expected = exon.intersect(cds_start, cds_end).map_or(0, |(s, e)| e - s);
        let covered: u32 = cds
            .iter()
            .filter_map(|c| exon.intersect(c.start, c.end))
            .map(|(s, e)| e - s)
            .sum();
        covered != expected
    });
    if discontiguous {
        issues.push(AnnotationIssue::DiscontiguousCds);
    }
}

/// Split an exon at the coding span boundaries. The pieces tile the exon.
fn partition_exon(exon: &Interval, cds_start: u32, cds_end: u32) -> Vec<SubRegion> {
    // Lower genomic coordinates are 5' on the forward strand and 3' on the reverse.
    let (low_kind, high_kind) = if exon.strand.is_reverse() {
        (RegionKind::Utr3, RegionKind::Utr5)
    } else {
        (RegionKind::Utr5, RegionKind::Utr3)
    };

    let mut regions = Vec::with_capacity(3);
    let mut push = |kind, start: u32, end: u32| {
        if start < end {
            regions.push(SubRegion {
                kind,
                interval: Interval { start, end, ..*exon },
            });
        }
    };
    push(low_kind, exon.start, exon.end.min(cds_start));
    push(
        RegionKind::Cds,
        exon.start.max(cds_start),
        exon.end.min(cds_end),
    );
    push(high_kind, exon.start.max(cds_end), exon.end);
    regions
}

fn check_coding_sequence(cds: &[u8], table: &CodonTable, issues: &mut Vec<AnnotationIssue>) {
    if cds.len() % 3 != 0 {
        issues.push(AnnotationIssue::CdsLengthNotMultipleOfThree);
    }
    if cds.len() < 3 || !table.is_start_codon(&cds[..3]) {
        issues.push(AnnotationIssue::MissingStartCodon);
    }
    if cds.len() < 3 {
        issues.push(AnnotationIssue::MissingStopCodon);
        return;
    }
    let (body, last) = cds.split_at(cds.len() - 3);
    if !table.is_stop_codon(last) {
        issues.push(AnnotationIssue::MissingStopCodon);
    }
    if body.chunks_exact(3).any(|codon| table.is_stop_codon(codon)) {
        issues.push(AnnotationIssue::PrematureStopCodon);
    }
}
