use crate::{
    models::City,
    pattern::{extract_value, CITY_COUNTRY, CITY_DATA},
};

/// City blocks in the order they close.
///
/// A `country` line overwrites the value of the block it sits in; a block
/// without one yields an empty country. A country line before the first
/// `city_data` goes to the first city, as with trailer definitions.
pub fn extract_cities(content: &str) -> Vec<(String, City)> {
    let mut committed = Vec::new();
    let mut name = String::new();
    let mut current = City::default();

    for line in content.lines() {
        if CITY_DATA.matches(line) {
            if !name.is_empty() {
                committed.push((std::mem::take(&mut name), std::mem::take(&mut current)));
            }
            name = extract_value(line);
        }
        if CITY_COUNTRY.matches(line) {
            current.country = extract_value(line);
        }
    }

    if !name.is_empty() {
        committed.push((name, current));
    }
    committed
}
