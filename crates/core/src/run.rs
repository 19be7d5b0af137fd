//! One complete extraction run: scan, write documents, optionally report.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::{
    config::AppConfig,
    error::ScanIssue,
    output,
    report::{report_path, ScanReport},
    scan::DefScanner,
};

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Documents (and report) written successfully.
    pub written: Vec<PathBuf>,
    /// Every absorbed problem, scan and write alike.
    pub issues: Vec<ScanIssue>,
    /// Number of input files read.
    pub files_scanned: usize,
}

/// Scan `config.base_dir` and write the tagged documents.
///
/// Never aborts on input or output problems; they end up in
/// [`RunSummary::issues`].
pub fn run(config: &AppConfig) -> RunSummary {
    info!(
        base_dir = %config.base_dir.display(),
        tag = %config.tag,
        "scanning definitions"
    );
    let outcome = DefScanner::new(&config.base_dir).scan();
    let mut issues = outcome.issues;
    let mut written =
        output::write_documents(&outcome.database, &config.output_dir, &config.tag, &mut issues);

    if config.write_report {
        let path = report_path(&config.output_dir, &config.tag);
        let report = ScanReport::new(
            config.tag.clone(),
            config.base_dir.clone(),
            outcome.files_scanned,
            &issues,
        );
        match report.persist(&path) {
            Ok(()) => written.push(path),
            Err(err) => warn!("{err:#}"),
        }
    }

    RunSummary {
        written,
        issues,
        files_scanned: outcome.files_scanned,
    }
}
