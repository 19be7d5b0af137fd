//! Single-pass record extractors, one per entity kind.
//!
//! Every extractor is a pure function of one file's content. Merging the
//! results into the aggregate is left to the caller.

/// Cargo identifier lines.
pub mod cargo;
/// City blocks and their country.
pub mod city;
/// City and cargo references inside company folders.
pub mod company;
/// Trailer variants and trailer definition blocks.
pub mod trailer;

pub use cargo::extract_cargoes;
pub use city::extract_cities;
pub use company::{extract_references, References};
pub use trailer::{extract_definitions, extract_variants};
