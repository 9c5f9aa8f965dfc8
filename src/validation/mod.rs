//! Transcript consistency checker.
//!
//! For every protein-coding transcript in scope, the assembled mRNA must start
//! with the 5' UTR and with the 5' UTR followed by the CDS. Results are returned
//! as records; the feature hierarchy is never modified.

use std::fmt;

use rayon::prelude::*;
use serde::Deserialize;

use crate::assembly;
use crate::error::Error;
use crate::feature::types::TranscriptId;
use crate::genome::Genome;
use crate::sequence::Sequence;

/// Which prefix check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MismatchKind {
    /// mRNA does not start with the 5' UTR.
    Utr5Prefix,
    /// mRNA does not start with the 5' UTR followed by the CDS.
    Utr5CdsPrefix,
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utr5Prefix => write!(f, "mRNA does not start with UTR5"),
            Self::Utr5CdsPrefix => write!(f, "mRNA does not start with UTR5 + CDS"),
        }
    }
}

/// What a scan does when it finds a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MismatchPolicy {
    /// Stop at the first mismatch and return [`Error::SequenceMismatch`].
    #[default]
    FailFast,
    /// Check every transcript (in parallel) and report all mismatches.
    Collect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    NonCoding,
    /// Only flagged transcripts are checked and this one has no issues.
    NoAnnotationIssues,
    NoUtr5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Consistent,
    Mismatch(MismatchKind),
    Skipped(SkipReason),
}

/// Result of checking one transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptValidation {
    pub transcript: TranscriptId,
    pub outcome: CheckOutcome,
}

/// A mismatch as reported by a collecting scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceMismatch {
    pub transcript: TranscriptId,
    pub transcript_id: String,
    pub gene_id: String,
    pub kind: MismatchKind,
}

#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub policy: MismatchPolicy,
    /// Restrict the check to transcripts carrying an annotation issue.
    pub flagged_only: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            policy: MismatchPolicy::FailFast,
            flagged_only: true,
        }
    }
}

/// Aggregate result of a scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub num_transcripts: usize,
    pub num_checked: usize,
    pub num_consistent: usize,
    pub num_non_coding: usize,
    pub num_unflagged: usize,
    pub num_no_utr5: usize,
    /// In gene, then transcript, load order.
    pub mismatches: Vec<SequenceMismatch>,
}

impl ScanReport {
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }

    fn record(&mut self, genome: &Genome, validation: &TranscriptValidation) {
        self.num_transcripts += 1;
        match validation.outcome {
            CheckOutcome::Consistent => {
                self.num_checked += 1;
                self.num_consistent += 1;
            }
            CheckOutcome::Mismatch(kind) => {
                self.num_checked += 1;
                self.mismatches
                    .push(mismatch_record(genome, validation.transcript, kind));
            }
            CheckOutcome::Skipped(SkipReason::NonCoding) => self.num_non_coding += 1,
            CheckOutcome::Skipped(SkipReason::NoAnnotationIssues) => self.num_unflagged += 1,
            CheckOutcome::Skipped(SkipReason::NoUtr5) => self.num_no_utr5 += 1,
        }
    }
}

/// Check one transcript. Errors only come from sequence assembly.
pub fn check_transcript(
    genome: &Genome,
    id: TranscriptId,
    flagged_only: bool,
) -> Result<TranscriptValidation, Error> {
    let transcript = genome.hierarchy().transcript(id);
    let skipped = |reason| TranscriptValidation {
        transcript: id,
        outcome: CheckOutcome::Skipped(reason),
    };

    if !transcript.is_protein_coding() {
        return Ok(skipped(SkipReason::NonCoding));
    }
    if flagged_only && !transcript.has_error_or_warning() {
        return Ok(skipped(SkipReason::NoAnnotationIssues));
    }
    if transcript.utrs5().is_empty() {
        return Ok(skipped(SkipReason::NoUtr5));
    }

    let chromosome = genome.chromosome_of(transcript)?;
    let mrna = assembly::mrna_from(chromosome, transcript)?;
    let utr5 = assembly::utr5(genome, transcript)?;
    let cds = assembly::cds_from(chromosome, transcript)?;

    let outcome = match check_prefixes(&mrna, &utr5, &cds) {
        Some(kind) => CheckOutcome::Mismatch(kind),
        None => CheckOutcome::Consistent,
    };
    Ok(TranscriptValidation {
        transcript: id,
        outcome,
    })
}

/// Apply the prefix law; returns the first check that fails.
#[must_use]
pub fn check_prefixes(mrna: &Sequence, utr5: &Sequence, cds: &Sequence) -> Option<MismatchKind> {
    if !mrna.starts_with(utr5) {
        return Some(MismatchKind::Utr5Prefix);
    }
    let mut coding_prefix = Sequence::with_capacity(utr5.len() + cds.len());
    coding_prefix.append(utr5);
    coding_prefix.append(cds);
    if !mrna.starts_with(&coding_prefix) {
        return Some(MismatchKind::Utr5CdsPrefix);
    }
    None
}

/// Check every transcript of every gene.
///
/// With [`MismatchPolicy::FailFast`] transcripts are checked in load order and
/// the first mismatch is returned as [`Error::SequenceMismatch`]. With
/// [`MismatchPolicy::Collect`] transcripts are checked in parallel and all
/// mismatches end up in the report.
pub fn scan(genome: &Genome, options: &ScanOptions) -> Result<ScanReport, Error> {
    let hierarchy = genome.hierarchy();
    let mut report = ScanReport::default();
    // every transcript of every gene, both in load order
    let ids: Vec<TranscriptId> = hierarchy
        .genes()
        .flat_map(|gene| gene.transcript_ids().iter().copied())
        .collect();

    match options.policy {
        MismatchPolicy::FailFast => {
            for &id in &ids {
                let transcript = hierarchy.transcript(id);
                let validation = check_transcript(genome, id, options.flagged_only)?;
                if let CheckOutcome::Mismatch(kind) = validation.outcome {
                    log::error!("transcript {}: {kind}", transcript.id);
                    return Err(Error::SequenceMismatch {
                        transcript_id: transcript.id.clone(),
                        kind,
                    });
                }
                report.record(genome, &validation);
            }
        }
        MismatchPolicy::Collect => {
            let validations = ids
                .par_iter()
                .map(|&id| check_transcript(genome, id, options.flagged_only))
                .collect::<Result<Vec<_>, Error>>()?;
            for validation in &validations {
                report.record(genome, validation);
            }
            for m in &report.mismatches {
                log::warn!("transcript {} (gene {}): {}", m.transcript_id, m.gene_id, m.kind);
            }
        }
    }

    log::info!(
        "scan: {} transcripts, {} checked, {} consistent, {} mismatches",
        report.num_transcripts,
        report.num_checked,
        report.num_consistent,
        report.mismatches.len()
    );
    Ok(report)
}

fn mismatch_record(genome: &Genome, id: TranscriptId, kind: MismatchKind) -> SequenceMismatch {
    let hierarchy = genome.hierarchy();
    let transcript = hierarchy.transcript(id);
    SequenceMismatch {
        transcript: id,
        transcript_id: transcript.id.clone(),
        gene_id: hierarchy.gene(transcript.gene).id.clone(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::Chromosome;
    use crate::feature::builder::{GeneRecord, TranscriptRecord};
    use crate::strand::Strand;

    fn coding(id: &str, exons: Vec<(u32, u32)>, cds: Vec<(u32, u32)>) -> TranscriptRecord {
        TranscriptRecord {
            id: id.to_string(),
            biotype: Some("protein_coding".to_string()),
            exons,
            cds,
        }
    }

    fn genome(transcripts: Vec<TranscriptRecord>) -> Genome {
        let chromosomes = vec![Chromosome::new("chr1", b"ACGTACGTTTGGCC".to_vec()).unwrap()];
        let genes = vec![GeneRecord {
            id: "G1".to_string(),
            symbol: None,
            chromosome: "chr1".to_string(),
            strand: Strand::Forward,
            transcripts,
        }];
        Genome::new("test", chromosomes, genes).unwrap()
    }

    fn outcome(genome: &Genome, id: &str, flagged_only: bool) -> CheckOutcome {
        let tx = genome.hierarchy().find_transcript(id).unwrap();
        check_transcript(genome, tx, flagged_only).unwrap().outcome
    }

    #[test]
    fn prefix_law() {
        let mrna = Sequence::from("GTACGTTT");
        assert_eq!(check_prefixes(&mrna, &"gt".into(), &"ACGT".into()), None);
        assert_eq!(
            check_prefixes(&mrna, &"TT".into(), &"ACGT".into()),
            Some(MismatchKind::Utr5Prefix)
        );
        assert_eq!(
            check_prefixes(&mrna, &"GT".into(), &"AAAA".into()),
            Some(MismatchKind::Utr5CdsPrefix)
        );
    }

    #[test]
    fn skip_reasons() {
        let mut lnc = coding("LNC", vec![(0, 12)], vec![]);
        lnc.biotype = Some("lncRNA".to_string());
        let g = genome(vec![
            lnc,
            // clean: ATG..stop would be needed, so this one is flagged
            coding("FLAGGED", vec![(2, 10)], vec![(4, 8)]),
            coding("NO_UTR5", vec![(4, 10)], vec![(4, 8)]),
        ]);
        assert_eq!(
            outcome(&g, "LNC", true),
            CheckOutcome::Skipped(SkipReason::NonCoding)
        );
        assert_eq!(outcome(&g, "FLAGGED", true), CheckOutcome::Consistent);
        assert_eq!(
            outcome(&g, "NO_UTR5", false),
            CheckOutcome::Skipped(SkipReason::NoUtr5)
        );
    }

    #[test]
    fn unflagged_transcripts_are_skipped_unless_requested() {
        let chromosomes = vec![Chromosome::new("chr2", b"GGATGAAATAGCC".to_vec()).unwrap()];
        let genes = vec![GeneRecord {
            id: "G2".to_string(),
            symbol: None,
            chromosome: "chr2".to_string(),
            strand: Strand::Forward,
            transcripts: vec![coding("CLEAN", vec![(0, 13)], vec![(2, 11)])],
        }];
        let g = Genome::new("clean", chromosomes, genes).unwrap();
        assert_eq!(
            outcome(&g, "CLEAN", true),
            CheckOutcome::Skipped(SkipReason::NoAnnotationIssues)
        );
        assert_eq!(outcome(&g, "CLEAN", false), CheckOutcome::Consistent);
    }

    fn inconsistent_genome() -> Genome {
        genome(vec![
            coding("OK", vec![(2, 10)], vec![(4, 8)]),
            // overlapping exons: the CDS of the second exon repeats base 4
            coding("BAD_CDS", vec![(0, 6), (4, 10)], vec![(2, 5)]),
            // the second exon sits inside the first, repeating UTR5 bases
            coding("BAD_UTR5", vec![(0, 10), (2, 4)], vec![(5, 8)]),
        ])
    }

    #[test]
    fn overlapping_exons_break_the_prefix_law() {
        let g = inconsistent_genome();
        assert_eq!(
            outcome(&g, "BAD_CDS", true),
            CheckOutcome::Mismatch(MismatchKind::Utr5CdsPrefix)
        );
        assert_eq!(
            outcome(&g, "BAD_UTR5", true),
            CheckOutcome::Mismatch(MismatchKind::Utr5Prefix)
        );
    }

    #[test]
    fn fail_fast_stops_at_first_mismatch() {
        let g = inconsistent_genome();
        let err = scan(&g, &ScanOptions::default()).unwrap_err();
        match err {
            Error::SequenceMismatch {
                transcript_id,
                kind,
            } => {
                assert_eq!(transcript_id, "BAD_CDS");
                assert_eq!(kind, MismatchKind::Utr5CdsPrefix);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn collect_reports_all_mismatches_in_order() {
        let g = inconsistent_genome();
        let options = ScanOptions {
            policy: MismatchPolicy::Collect,
            flagged_only: true,
        };
        let report = scan(&g, &options).unwrap();
        assert!(!report.is_consistent());
        assert_eq!(report.num_transcripts, 3);
        assert_eq!(report.num_checked, 3);
        assert_eq!(report.num_consistent, 1);
        let ids: Vec<&str> = report
            .mismatches
            .iter()
            .map(|m| m.transcript_id.as_str())
            .collect();
        assert_eq!(ids, vec!["BAD_CDS", "BAD_UTR5"]);
        assert!(report.mismatches.iter().all(|m| m.gene_id == "G1"));
    }

    #[test]
    fn policy_from_json() {
        let policy: MismatchPolicy = serde_json::from_str("\"collect\"").unwrap();
        assert_eq!(policy, MismatchPolicy::Collect);
        let policy: MismatchPolicy = serde_json::from_str("\"failFast\"").unwrap();
        assert_eq!(policy, MismatchPolicy::FailFast);
    }
}
