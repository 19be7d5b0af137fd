//! Optional diagnostics report stored next to the output documents.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{error::ScanIssue, output};

/// Summary of one run and every problem it absorbed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Run tag the outputs were written under.
    pub tag: String,
    /// Base directory that was scanned.
    pub base_dir: PathBuf,
    /// Number of files read successfully.
    pub files_scanned: usize,
    /// Human-readable issue descriptions in occurrence order.
    pub issues: Vec<String>,
}

impl ScanReport {
    /// Build a report from the issues collected during a run.
    pub fn new(
        tag: impl Into<String>,
        base_dir: impl Into<PathBuf>,
        files_scanned: usize,
        issues: &[ScanIssue],
    ) -> Self {
        Self {
            tag: tag.into(),
            base_dir: base_dir.into(),
            files_scanned,
            issues: issues.iter().map(ToString::to_string).collect(),
        }
    }

    /// Load a report, returning `None` if it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read report {}", path.display()))?;
        let report = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse report {}", path.display()))?;
        Ok(Some(report))
    }

    /// Persist the report, creating parent directories if needed.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        output::write_value(path, self)
            .with_context(|| format!("failed to write report {}", path.display()))
    }
}

/// Report location for a run tag inside the output directory.
pub fn report_path(output_dir: impl AsRef<Path>, tag: &str) -> PathBuf {
    output_dir.as_ref().join(format!("report_{tag}.json"))
}
