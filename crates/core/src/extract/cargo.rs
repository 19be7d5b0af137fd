use crate::pattern::{extract_value, CARGO_DATA};

/// Every `cargo_data :` value in file order.
pub fn extract_cargoes(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| CARGO_DATA.matches(line))
        .map(extract_value)
        .collect()
}
