//! Line classification for the `key : value` definition grammar.

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix matcher for a single field token (`token : ...`).
#[derive(Debug, Clone)]
pub struct LinePattern {
    token: &'static str,
    regex: Regex,
}

impl LinePattern {
    /// Build a matcher for the literal `token` followed by optional whitespace and a colon.
    pub fn new(token: &'static str) -> Self {
        let regex = Regex::new(&format!(r"^{}\s*:", regex::escape(token)))
            .expect("escaped token always forms a valid regex");
        Self { token, regex }
    }

    /// Literal token this pattern matches.
    pub fn token(&self) -> &'static str {
        self.token
    }

    /// Whether `line` carries this field once leading whitespace is ignored.
    pub fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line.trim_start())
    }
}

/// `trailer : <variant>` inside vehicle/trailer files.
pub static TRAILER: Lazy<LinePattern> = Lazy::new(|| LinePattern::new("trailer"));
/// Opens a trailer (or cargo) definition block.
pub static TRAILER_DEF: Lazy<LinePattern> = Lazy::new(|| LinePattern::new("trailer_def"));
/// Country a trailer definition is valid in.
pub static COUNTRY_VALIDITY: Lazy<LinePattern> =
    Lazy::new(|| LinePattern::new("country_validity[]"));
/// Cargo identifier line.
pub static CARGO_DATA: Lazy<LinePattern> = Lazy::new(|| LinePattern::new("cargo_data"));
/// City reference inside a company's `editor` files.
pub static COMPANY_CITY: Lazy<LinePattern> = Lazy::new(|| LinePattern::new("company_def"));
/// Cargo reference inside a company's `in`/`out` files.
pub static COMPANY_CARGO: Lazy<LinePattern> = Lazy::new(|| LinePattern::new("cargo_def"));
/// Opens a city block.
pub static CITY_DATA: Lazy<LinePattern> = Lazy::new(|| LinePattern::new("city_data"));
/// Country of the current city block.
pub static CITY_COUNTRY: Lazy<LinePattern> = Lazy::new(|| LinePattern::new("country"));

/// Value after the first colon, cut at the first tab and trimmed.
///
/// Text following a tab is treated as an annotation and dropped.
pub fn extract_value(line: &str) -> String {
    let after = line.split_once(':').map(|(_, rest)| rest).unwrap_or("");
    after.split('\t').next().unwrap_or("").trim().to_string()
}

/// Quoted/sigil-prefixed value used by company files: `key : .name { ... }`.
///
/// Takes the text before the first `{`, trims it and drops its leading
/// character. Returns `None` when there is no character left to drop.
pub fn extract_company_value(line: &str) -> Option<String> {
    let after = line.split_once(':').map(|(_, rest)| rest)?;
    let segment = after.split('{').next().unwrap_or("").trim();
    let mut chars = segment.chars();
    chars.next()?;
    Some(chars.as_str().to_string())
}
