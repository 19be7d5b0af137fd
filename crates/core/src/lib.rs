#![warn(clippy::all, missing_docs)]

//! Core logic for extracting trailer, cargo, company and city facts from
//! unpacked game definition files.
//!
//! The crate hosts the line classifier, the per-entity extractors, the
//! directory walker that feeds them, and the JSON writers used by the
//! command-line frontend.

pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod output;
pub mod pattern;
pub mod report;
pub mod run;
pub mod scan;
pub mod walker;

pub use config::{AppConfig, ConfigOverrides};
pub use error::ScanIssue;
pub use models::{City, Company, DefsDatabase, TrailerCollection, TrailerDefinition};
pub use report::ScanReport;
pub use run::{run, RunSummary};
pub use scan::{DefScanner, InputLayout, ScanOutcome};
