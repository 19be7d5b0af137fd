//! Problems absorbed during a scan.

use std::{io, path::PathBuf};

use thiserror::Error;

/// A recoverable problem. The scan records it and moves on.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ScanIssue {
    /// One of the fixed input roots does not exist.
    #[error("missing directory {}", .path.display())]
    MissingRoot { path: PathBuf },

    /// A directory exists but could not be listed.
    #[error("failed to list {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A company reference line had no value to extract.
    #[error("skipped malformed `{token}` line {line} in {}", .path.display())]
    MalformedReference {
        path: PathBuf,
        line: usize,
        token: &'static str,
    },

    /// An output document could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
