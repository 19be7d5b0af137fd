//! Walks the definition tree and aggregates every extractor's output.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{
    error::ScanIssue,
    extract::{
        extract_cargoes, extract_cities, extract_definitions, extract_references,
        extract_variants,
    },
    models::DefsDatabase,
    pattern::{LinePattern, COMPANY_CARGO, COMPANY_CITY},
    walker::{list_dir, read_file, Entry, Presence},
};

/// Fixed input directories relative to a base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLayout {
    /// `vehicle/trailer`
    pub trailer: PathBuf,
    /// `vehicle/trailer_defs`
    pub trailer_defs: PathBuf,
    /// `cargo`, plus one level of subdirectories.
    pub cargo: PathBuf,
    /// `company/<name>/{editor,in,out}`
    pub company: PathBuf,
    /// `city`
    pub city: PathBuf,
}

impl InputLayout {
    /// Standard layout beneath `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        let base = base_dir.as_ref();
        Self {
            trailer: base.join("vehicle").join("trailer"),
            trailer_defs: base.join("vehicle").join("trailer_defs"),
            cargo: base.join("cargo"),
            company: base.join("company"),
            city: base.join("city"),
        }
    }
}

/// Result of a best-effort scan.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Aggregated records.
    pub database: DefsDatabase,
    /// Problems absorbed along the way, in the order they occurred.
    pub issues: Vec<ScanIssue>,
    /// Number of files successfully read.
    pub files_scanned: usize,
}

/// Sequential scanner over one unpacked definition tree.
#[derive(Debug, Clone)]
pub struct DefScanner {
    layout: InputLayout,
}

/// Company subfolders in scan order.
const COMPANY_FOLDERS: [CompanyFolder; 3] = [
    CompanyFolder::Editor,
    CompanyFolder::In,
    CompanyFolder::Out,
];

#[derive(Debug, Clone, Copy)]
enum CompanyFolder {
    Editor,
    In,
    Out,
}

impl CompanyFolder {
    fn name(self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::In => "in",
            Self::Out => "out",
        }
    }

    fn pattern(self) -> &'static LinePattern {
        match self {
            Self::Editor => &*COMPANY_CITY,
            Self::In | Self::Out => &*COMPANY_CARGO,
        }
    }
}

impl DefScanner {
    /// Scanner rooted at `base_dir` with the standard layout.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self::with_layout(InputLayout::new(base_dir))
    }

    /// Scanner over an explicit layout.
    pub fn with_layout(layout: InputLayout) -> Self {
        Self { layout }
    }

    /// Process every root in a fixed order. Never fails; see [`ScanOutcome::issues`].
    pub fn scan(&self) -> ScanOutcome {
        let mut state = ScanState::default();
        state.scan_trailers(&self.layout.trailer);
        state.scan_trailer_defs(&self.layout.trailer_defs);
        state.scan_cargo(&self.layout.cargo);
        state.scan_companies(&self.layout.company);
        state.scan_cities(&self.layout.city);

        info!(
            files = state.outcome.files_scanned,
            issues = state.outcome.issues.len(),
            "scan finished"
        );
        state.outcome
    }
}

#[derive(Default)]
struct ScanState {
    outcome: ScanOutcome,
}

impl ScanState {
    fn list(&mut self, dir: &Path, presence: Presence) -> Vec<Entry> {
        let mut issues = Vec::new();
        let entries = list_dir(dir, presence, &mut issues);
        self.record_all(issues);
        entries
    }

    fn read(&mut self, path: &Path) -> Option<String> {
        let mut issues = Vec::new();
        let content = read_file(path, &mut issues);
        self.record_all(issues);
        if content.is_some() {
            debug!("read {}", path.display());
            self.outcome.files_scanned += 1;
        }
        content
    }

    fn record_all(&mut self, issues: Vec<ScanIssue>) {
        for issue in issues {
            self.record(issue);
        }
    }

    fn record(&mut self, issue: ScanIssue) {
        warn!("{issue}");
        self.outcome.issues.push(issue);
    }

    /// Plain files of `dir`; subdirectories are skipped.
    fn files(&mut self, dir: &Path, presence: Presence) -> Vec<Entry> {
        self.list(dir, presence)
            .into_iter()
            .filter(|entry| {
                if entry.is_dir {
                    debug!("skipping nested directory {}", entry.path.display());
                }
                !entry.is_dir
            })
            .collect()
    }

    fn scan_trailers(&mut self, dir: &Path) {
        let before = self.outcome.database.trailers.variants.len();
        for entry in self.files(dir, Presence::Required) {
            if let Some(content) = self.read(&entry.path) {
                self.outcome.database.add_variants(extract_variants(&content));
            }
        }
        info!(
            "collected {} trailer variants from {}",
            self.outcome.database.trailers.variants.len() - before,
            dir.display()
        );
    }

    fn scan_trailer_defs(&mut self, dir: &Path) {
        for entry in self.files(dir, Presence::Required) {
            if let Some(content) = self.read(&entry.path) {
                self.outcome.database.add_definitions(extract_definitions(&content));
            }
        }
        info!(
            "{} trailer definitions after {}",
            self.outcome.database.trailers.definitions.len(),
            dir.display()
        );
    }

    /// Cargo files feed both the definition map and the cargo list.
    /// Subdirectories are descended exactly one level.
    fn scan_cargo(&mut self, dir: &Path) {
        for entry in self.list(dir, Presence::Required) {
            if entry.is_dir {
                for child in self.files(&entry.path, Presence::Optional) {
                    self.scan_cargo_file(&child.path);
                }
            } else {
                self.scan_cargo_file(&entry.path);
            }
        }
        info!(
            "collected {} cargo ids from {}",
            self.outcome.database.cargoes.len(),
            dir.display()
        );
    }

    fn scan_cargo_file(&mut self, path: &Path) {
        if let Some(content) = self.read(path) {
            let database = &mut self.outcome.database;
            database.add_definitions(extract_definitions(&content));
            database.add_cargoes(extract_cargoes(&content));
        }
    }

    /// One company per subdirectory; loose files at the root are ignored.
    fn scan_companies(&mut self, dir: &Path) {
        for entry in self.list(dir, Presence::Required) {
            if !entry.is_dir {
                continue;
            }
            self.outcome.database.company_mut(&entry.name);
            for folder in COMPANY_FOLDERS {
                self.scan_company_folder(&entry, folder);
            }
        }
        info!(
            "collected {} companies from {}",
            self.outcome.database.companies.len(),
            dir.display()
        );
    }

    fn scan_company_folder(&mut self, company: &Entry, folder: CompanyFolder) {
        let dir = company.path.join(folder.name());
        let pattern = folder.pattern();
        for file in self.files(&dir, Presence::Optional) {
            let Some(content) = self.read(&file.path) else {
                continue;
            };
            let refs = extract_references(&content, pattern);
            for line in refs.malformed {
                self.record(ScanIssue::MalformedReference {
                    path: file.path.clone(),
                    line,
                    token: pattern.token(),
                });
            }

            let target = self.outcome.database.company_mut(&company.name);
            let list = match folder {
                CompanyFolder::Editor => &mut target.cities,
                CompanyFolder::In => &mut target.cargoes_in,
                CompanyFolder::Out => &mut target.cargoes_out,
            };
            list.extend(refs.values);
        }
    }

    fn scan_cities(&mut self, dir: &Path) {
        for entry in self.files(dir, Presence::Required) {
            if let Some(content) = self.read(&entry.path) {
                self.outcome.database.add_cities(extract_cities(&content));
            }
        }
        info!(
            "collected {} cities from {}",
            self.outcome.database.cities.len(),
            dir.display()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, content: &str) -> Result<()> {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    #[test]
    fn scans_full_tree() -> Result<()> {
        let temp = tempdir()?;
        let root = temp.path();

        write(root, "vehicle/trailer/a.sii", "trailer: foo\t#comment\ntrailer: bar\n")?;
        write(
            root,
            "vehicle/trailer_defs/defs.sii",
            "trailer_def: A\ncountry_validity[]: X\ncountry_validity[]: Y\ntrailer_def: B\ncountry_validity[]: Z\n",
        )?;
        write(root, "cargo/apples.sii", "cargo_data: apples\n")?;
        write(
            root,
            "cargo/fresh/beef.sii",
            "cargo_data: beef\ntrailer_def: C\ncountry_validity[]: W\n",
        )?;
        write(root, "company/acme/editor/berlin.sii", "company_def : .acme.berlin {\n")?;
        write(root, "company/acme/in/apples.sii", "cargo_def : .apples {\n")?;
        write(root, "company/acme/out/beef.sii", "cargo_def : .beef {\n")?;
        fs::create_dir_all(root.join("company/empty"))?;
        write(root, "company/readme.txt", "not a company")?;
        write(
            root,
            "city/cities.sii",
            "city_data: Springfield\ncountry: US\ncity_data: Shelbyville\n",
        )?;

        let outcome = DefScanner::new(root).scan();
        assert!(outcome.issues.is_empty(), "{:?}", outcome.issues);
        assert_eq!(outcome.files_scanned, 8);

        let db = outcome.database;
        assert_eq!(db.trailers.variants, vec!["foo", "bar"]);
        let names: Vec<_> = db.trailers.definitions.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(db.trailers.definitions["A"].countries, vec!["X", "Y"]);
        assert_eq!(db.trailers.definitions["B"].countries, vec!["Z"]);
        assert_eq!(db.trailers.definitions["C"].countries, vec!["W"]);
        assert_eq!(db.cargoes, vec!["apples", "beef"]);

        assert_eq!(db.companies.len(), 2);
        let acme = &db.companies["acme"];
        assert_eq!(acme.cities, vec!["acme.berlin"]);
        assert_eq!(acme.cargoes_in, vec!["apples"]);
        assert_eq!(acme.cargoes_out, vec!["beef"]);
        assert_eq!(db.companies["empty"], Default::default());

        assert_eq!(db.cities["Springfield"].country, "US");
        assert_eq!(db.cities["Shelbyville"].country, "");
        Ok(())
    }

    #[test]
    fn later_files_overwrite_definitions() -> Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        write(root, "vehicle/trailer_defs/1.sii", "trailer_def: A\ncountry_validity[]: X\n")?;
        write(root, "vehicle/trailer_defs/2.sii", "trailer_def: A\ncountry_validity[]: Y\n")?;
        write(root, "city/1.sii", "city_data: berlin\ncountry: germany\n")?;
        write(root, "city/2.sii", "city_data: berlin\n")?;

        let db = DefScanner::new(root).scan().database;
        assert_eq!(db.trailers.definitions["A"].countries, vec!["Y"]);
        assert_eq!(db.cities["berlin"].country, "");
        Ok(())
    }

    #[test]
    fn cargo_definitions_override_trailer_definitions() -> Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        write(root, "vehicle/trailer_defs/a.sii", "trailer_def: A\ncountry_validity[]: X\n")?;
        write(root, "cargo/a.sii", "trailer_def: A\ncountry_validity[]: Y\n")?;

        let db = DefScanner::new(root).scan().database;
        assert_eq!(db.trailers.definitions["A"].countries, vec!["Y"]);
        Ok(())
    }

    #[test]
    fn cargo_recursion_stops_after_one_level() -> Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        write(root, "cargo/sub/one.sii", "cargo_data: one\n")?;
        write(root, "cargo/sub/deeper/two.sii", "cargo_data: two\n")?;

        let db = DefScanner::new(root).scan().database;
        assert_eq!(db.cargoes, vec!["one"]);
        Ok(())
    }

    #[test]
    fn empty_tree_reports_missing_roots() -> Result<()> {
        let temp = tempdir()?;
        let outcome = DefScanner::new(temp.path()).scan();
        assert_eq!(outcome.database, DefsDatabase::default());
        assert_eq!(outcome.files_scanned, 0);
        assert_eq!(outcome.issues.len(), 5);
        assert!(outcome
            .issues
            .iter()
            .all(|issue| matches!(issue, ScanIssue::MissingRoot { .. })));
        Ok(())
    }

    #[test]
    fn malformed_company_lines_are_skipped_and_reported() -> Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        write(root, "company/acme/in/a.sii", "cargo_def : {\ncargo_def : .apples {\n")?;

        let outcome = DefScanner::new(root).scan();
        assert_eq!(outcome.database.companies["acme"].cargoes_in, vec!["apples"]);
        assert!(outcome.issues.iter().any(|issue| matches!(
            issue,
            ScanIssue::MalformedReference { line: 1, token: "cargo_def", .. }
        )));
        Ok(())
    }
}
