//! Directory listing and file reading that never fail the scan.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::ScanIssue;

/// Whether a directory's absence is worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Missing directory is recorded as an issue.
    Required,
    /// Missing directory is expected and only logged.
    Optional,
}

/// Immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct Entry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
}

/// Immediate children of `dir`, sorted by file name.
///
/// Listing problems are pushed to `issues` and yield whatever entries were
/// read before the failure.
pub fn list_dir(dir: &Path, presence: Presence, issues: &mut Vec<ScanIssue>) -> Vec<Entry> {
    if !dir.is_dir() {
        match presence {
            Presence::Required => issues.push(ScanIssue::MissingRoot {
                path: dir.to_path_buf(),
            }),
            Presence::Optional => debug!("no directory at {}", dir.display()),
        }
        return Vec::new();
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => entries.push(Entry {
                path: entry.path().to_path_buf(),
                name: entry.file_name().to_string_lossy().to_string(),
                is_dir: entry.file_type().is_dir(),
            }),
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| dir.to_path_buf());
                issues.push(ScanIssue::ReadDir {
                    path,
                    source: err.into(),
                });
            }
        }
    }
    entries
}

/// File content decoded as UTF-8, replacing invalid bytes.
pub fn read_file(path: &Path, issues: &mut Vec<ScanIssue>) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(source) => {
            issues.push(ScanIssue::ReadFile {
                path: path.to_path_buf(),
                source,
            });
            None
        }
    }
}
