use crate::pattern::{extract_company_value, LinePattern};

/// References pulled out of one company file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct References {
    /// Extracted names in file order.
    pub values: Vec<String>,
    /// 1-based numbers of matching lines that had nothing to extract.
    pub malformed: Vec<usize>,
}

/// Values of every line matching `pattern`, using the company value rule.
///
/// The caller decides which company list the values belong to.
pub fn extract_references(content: &str, pattern: &LinePattern) -> References {
    let mut refs = References::default();
    for (index, line) in content.lines().enumerate() {
        if !pattern.matches(line) {
            continue;
        }
        match extract_company_value(line) {
            Some(value) => refs.values.push(value),
            None => refs.malformed.push(index + 1),
        }
    }
    refs
}
