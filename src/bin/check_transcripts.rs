use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;

use annoforest::cli;
use annoforest::config::ScanConfig;
use annoforest::forest::IntervalForest;
use annoforest::loader;
use annoforest::validation::{self, MismatchPolicy};

#[derive(Parser)]
#[command(
    name = "check_transcripts",
    about = "Check that assembled transcript sequences are internally consistent"
)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short = 'c', long = "config")]
    config: PathBuf,

    /// Report every mismatch instead of stopping at the first one
    #[arg(long)]
    collect: bool,

    /// Check every coding transcript, not only those with annotation issues
    #[arg(long)]
    all: bool,
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let start = Instant::now();
    let cli_args = Cli::parse();

    cli::banner("Check Transcripts");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let config = ScanConfig::from_file(&cli_args.config)?;
    let mut options = config.scan_options();
    if cli_args.collect {
        options.policy = MismatchPolicy::Collect;
    }
    if cli_args.all {
        options.flagged_only = false;
    }

    cli::kv("Config", &cli_args.config.display().to_string());
    cli::kv("Genome", &config.genome);
    cli::kv("FASTA", &config.fasta.display().to_string());
    cli::kv("Annotations", &config.annotations.display().to_string());
    cli::kv("Mismatch policy", &format!("{:?}", options.policy));
    cli::kv(
        "Scope",
        if options.flagged_only {
            "flagged transcripts"
        } else {
            "all coding transcripts"
        },
    );

    eprintln!();

    // ── Genome ───────────────────────────────────────────
    cli::section("Genome");

    let genome = loader::load_genome(&config.genome, &config.fasta, &config.annotations)
        .with_context(|| format!("failed to load genome '{}'", config.genome))?;
    let hierarchy = genome.hierarchy();
    let flagged = hierarchy
        .transcripts()
        .filter(|(_, tx)| tx.has_error_or_warning())
        .count();

    cli::kv("Chromosomes", &genome.chromosomes().len().to_string());
    cli::kv("Genes", &hierarchy.num_genes().to_string());
    cli::kv("Transcripts", &hierarchy.num_transcripts().to_string());
    cli::kv("Flagged", &flagged.to_string());

    eprintln!();

    // ── Interval Forest ──────────────────────────────────
    cli::section("Interval Forest");

    let forest_start = Instant::now();
    let forest = IntervalForest::for_genome(&genome);
    cli::kv("Intervals", &forest.len().to_string());
    cli::kv("Build time", &cli::format_elapsed(forest_start.elapsed()));

    eprintln!();

    // ── Consistency Scan ─────────────────────────────────
    cli::section("Consistency Scan");

    let report = match validation::scan(&genome, &options) {
        Ok(report) => report,
        Err(e @ annoforest::error::Error::SequenceMismatch { .. }) => {
            cli::failure(&e.to_string());
            cli::print_summary(start);
            bail!(e);
        }
        Err(e) => return Err(e).context("consistency scan failed"),
    };

    cli::kv("Transcripts", &report.num_transcripts.to_string());
    cli::kv("Checked", &report.num_checked.to_string());
    cli::kv("Consistent", &report.num_consistent.to_string());
    cli::kv("Non-coding", &report.num_non_coding.to_string());
    cli::kv("Unflagged", &report.num_unflagged.to_string());
    cli::kv("Without UTR5", &report.num_no_utr5.to_string());

    eprintln!();

    if report.is_consistent() {
        cli::success("all checked transcripts are consistent");
    } else {
        for m in &report.mismatches {
            cli::warning(&format!(
                "{} {} {}",
                m.transcript_id.bold(),
                format!("(gene {})", m.gene_id).dimmed(),
                m.kind
            ));
        }
        cli::failure(&format!(
            "{} transcripts with inconsistent sequences",
            report.mismatches.len()
        ));
    }

    cli::print_summary(start);

    if !report.is_consistent() {
        bail!("{} sequence mismatches", report.mismatches.len());
    }
    Ok(())
}
