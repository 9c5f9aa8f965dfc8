use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::validation::{MismatchPolicy, ScanOptions};

fn default_flagged_only() -> bool {
    true
}

/// Configuration of a transcript consistency scan.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanConfig {
    /// Genome name used in reports, e.g. `GRCh38`.
    pub genome: String,
    pub fasta: PathBuf,
    pub annotations: PathBuf,
    #[serde(default)]
    pub mismatch_policy: MismatchPolicy,
    #[serde(default = "default_flagged_only")]
    pub flagged_only: bool,
}

impl ScanConfig {
    /// Read and validate a config file. Relative paths are resolved against
    /// the directory holding the config.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;

        if let Some(dir) = path.parent() {
            config.fasta = dir.join(&config.fasta);
            config.annotations = dir.join(&config.annotations);
        }
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.genome.trim().is_empty() {
            bail!("genome name must not be empty");
        }
        for (name, path) in [("fasta", &self.fasta), ("annotations", &self.annotations)] {
            if path.as_os_str().is_empty() {
                bail!("path for '{name}' must not be empty");
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            policy: self.mismatch_policy,
            flagged_only: self.flagged_only,
        }
    }
}
