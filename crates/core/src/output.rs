//! JSON documents written at the end of a run.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{info, warn};

use crate::{error::ScanIssue, models::DefsDatabase};

/// Output document kinds, in write order.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Trailers,
    Cargoes,
    Companies,
    Cities,
}

impl Document {
    /// Every document produced by a run.
    pub const ALL: [Document; 4] = [
        Document::Trailers,
        Document::Cargoes,
        Document::Companies,
        Document::Cities,
    ];

    /// File name prefix.
    pub fn stem(self) -> &'static str {
        match self {
            Self::Trailers => "trailers",
            Self::Cargoes => "cargoes",
            Self::Companies => "companies",
            Self::Cities => "cities",
        }
    }

    /// `<stem>_<tag>.json`
    pub fn file_name(self, tag: &str) -> String {
        format!("{}_{}.json", self.stem(), tag)
    }
}

/// Render one document with two-space indentation.
pub fn render(database: &DefsDatabase, document: Document) -> serde_json::Result<Vec<u8>> {
    match document {
        Document::Trailers => serde_json::to_vec_pretty(&database.trailers),
        Document::Cargoes => serde_json::to_vec_pretty(&database.cargoes),
        Document::Companies => serde_json::to_vec_pretty(&database.companies),
        Document::Cities => serde_json::to_vec_pretty(&database.cities),
    }
}

/// Write all four documents into `dir`.
///
/// Each document is written independently; failures are returned as issues
/// and do not stop the remaining writes. Returns the paths that were written.
pub fn write_documents(
    database: &DefsDatabase,
    dir: &Path,
    tag: &str,
    issues: &mut Vec<ScanIssue>,
) -> Vec<PathBuf> {
    let mut written = Vec::new();
    for document in Document::ALL {
        let path = dir.join(document.file_name(tag));
        let result = render(database, document)
            .map_err(io::Error::from)
            .and_then(|bytes| write_json(&path, &bytes));
        match result {
            Ok(()) => {
                info!("wrote {}", path.display());
                written.push(path);
            }
            Err(source) => {
                let issue = ScanIssue::WriteOutput { path, source };
                warn!("{issue}");
                issues.push(issue);
            }
        }
    }
    written
}

/// Serialize `value` and write it to `path`, creating parent directories.
pub fn write_value<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    write_json(path, &bytes)
}

fn write_json(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{City, TrailerDefinition};
    use anyhow::Result;
    use tempfile::tempdir;

    fn sample() -> DefsDatabase {
        let mut db = DefsDatabase::default();
        db.add_variants(["foo".to_string(), "bar".to_string()]);
        db.add_definitions([(
            "A".to_string(),
            TrailerDefinition {
                countries: vec!["X".to_string()],
            },
        )]);
        db.add_cargoes(["apples".to_string()]);
        db.company_mut("acme").cities.push("berlin".to_string());
        db.add_cities([
            ("zurich".to_string(), City::default()),
            (
                "berlin".to_string(),
                City {
                    country: "germany".to_string(),
                },
            ),
        ]);
        db
    }

    #[test]
    fn renders_documented_shapes() -> Result<()> {
        let db = sample();
        let trailers = String::from_utf8(render(&db, Document::Trailers)?)?;
        assert_eq!(
            trailers,
            "{\n  \"variants\": [\n    \"foo\",\n    \"bar\"\n  ],\n  \"definitions\": {\n    \"A\": {\n      \"countries\": [\n        \"X\"\n      ]\n    }\n  }\n}"
        );

        let companies: serde_json::Value = serde_json::from_slice(&render(&db, Document::Companies)?)?;
        assert_eq!(
            companies,
            serde_json::json!({
                "acme": { "cities": ["berlin"], "cargoes_in": [], "cargoes_out": [] }
            })
        );

        let cities = String::from_utf8(render(&db, Document::Cities)?)?;
        let berlin = cities.find("berlin").expect("berlin present");
        let zurich = cities.find("zurich").expect("zurich present");
        assert!(berlin < zurich, "city keys are sorted");
        Ok(())
    }

    #[test]
    fn writes_tagged_files_identically_twice() -> Result<()> {
        let temp = tempdir()?;
        let db = sample();
        let mut issues = Vec::new();

        let written = write_documents(&db, temp.path(), "promods", &mut issues);
        assert!(issues.is_empty());
        let names: Vec<_> = written
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                "trailers_promods.json",
                "cargoes_promods.json",
                "companies_promods.json",
                "cities_promods.json"
            ]
        );
        let first: Vec<Vec<u8>> = written.iter().map(fs::read).collect::<io::Result<_>>()?;

        write_documents(&db, temp.path(), "promods", &mut issues);
        let second: Vec<Vec<u8>> = written.iter().map(fs::read).collect::<io::Result<_>>()?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn empty_database_renders_valid_documents() -> Result<()> {
        let db = DefsDatabase::default();
        let cargoes: serde_json::Value = serde_json::from_slice(&render(&db, Document::Cargoes)?)?;
        assert_eq!(cargoes, serde_json::json!([]));
        let trailers: serde_json::Value = serde_json::from_slice(&render(&db, Document::Trailers)?)?;
        assert_eq!(trailers, serde_json::json!({ "variants": [], "definitions": {} }));
        assert_eq!(render(&db, Document::Companies)?, b"{}");
        Ok(())
    }

    #[test]
    fn write_failure_becomes_issue() -> Result<()> {
        let temp = tempdir()?;
        let blocker = temp.path().join("blocked");
        fs::write(&blocker, "file in the way")?;
        let mut issues = Vec::new();

        let written = write_documents(&sample(), &blocker, "x", &mut issues);
        assert!(written.is_empty());
        assert_eq!(issues.len(), 4);
        assert!(issues
            .iter()
            .all(|issue| matches!(issue, ScanIssue::WriteOutput { .. })));
        Ok(())
    }
}
