//! Aggregated records extracted from the definition tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Trailer variants plus the country validity of every trailer definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrailerCollection {
    /// Trailer type names in discovery order; duplicates are kept.
    pub variants: Vec<String>,
    /// Definitions keyed by name. A later definition replaces an earlier one.
    pub definitions: BTreeMap<String, TrailerDefinition>,
}

/// Countries a single trailer definition is valid in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrailerDefinition {
    /// Country codes in file order.
    pub countries: Vec<String>,
}

/// City and cargo associations of one company folder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Cities referenced from the `editor` folder.
    pub cities: Vec<String>,
    /// Cargoes referenced from the `in` folder.
    pub cargoes_in: Vec<String>,
    /// Cargoes referenced from the `out` folder.
    pub cargoes_out: Vec<String>,
}

/// Country a city belongs to. Empty when the block never set one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Country code from the block's `country` line.
    pub country: String,
}

/// Everything a scan produces, one field per output document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefsDatabase {
    /// `trailers_<tag>.json`
    pub trailers: TrailerCollection,
    /// `cargoes_<tag>.json`
    pub cargoes: Vec<String>,
    /// `companies_<tag>.json`, keyed by company folder name.
    pub companies: BTreeMap<String, Company>,
    /// `cities_<tag>.json`, keyed by city name.
    pub cities: BTreeMap<String, City>,
}

impl DefsDatabase {
    /// Append trailer variants found in one file.
    pub fn add_variants(&mut self, variants: impl IntoIterator<Item = String>) {
        self.trailers.variants.extend(variants);
    }

    /// Commit definitions in the order they were closed, replacing same-named entries.
    pub fn add_definitions(
        &mut self,
        definitions: impl IntoIterator<Item = (String, TrailerDefinition)>,
    ) {
        for (name, definition) in definitions {
            self.trailers.definitions.insert(name, definition);
        }
    }

    /// Append cargo identifiers found in one file.
    pub fn add_cargoes(&mut self, cargoes: impl IntoIterator<Item = String>) {
        self.cargoes.extend(cargoes);
    }

    /// Company entry for `folder`, created empty on first use.
    pub fn company_mut(&mut self, folder: &str) -> &mut Company {
        self.companies.entry(folder.to_string()).or_default()
    }

    /// Commit cities in the order they were closed, replacing same-named entries.
    pub fn add_cities(&mut self, cities: impl IntoIterator<Item = (String, City)>) {
        for (name, city) in cities {
            self.cities.insert(name, city);
        }
    }
}
