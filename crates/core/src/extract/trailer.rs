use crate::{
    models::TrailerDefinition,
    pattern::{extract_value, COUNTRY_VALIDITY, TRAILER, TRAILER_DEF},
};

/// Every `trailer :` value in file order.
pub fn extract_variants(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| TRAILER.matches(line))
        .map(extract_value)
        .collect()
}

/// Definition blocks in the order they close.
///
/// Country lines go to whichever accumulator is live, so lines that appear
/// before the first `trailer_def` end up in the first named definition.
/// Cargo files share this grammar and are read through the same function.
pub fn extract_definitions(content: &str) -> Vec<(String, TrailerDefinition)> {
    let mut committed = Vec::new();
    let mut name = String::new();
    let mut current = TrailerDefinition::default();

    for line in content.lines() {
        if TRAILER_DEF.matches(line) {
            if !name.is_empty() {
                committed.push((std::mem::take(&mut name), std::mem::take(&mut current)));
            }
            name = extract_value(line);
        }
        if COUNTRY_VALIDITY.matches(line) {
            current.countries.push(extract_value(line));
        }
    }

    if !name.is_empty() {
        committed.push((name, current));
    }
    committed
}
