//! Consistency check between `meta.taxonomies` and the taxonomies used in
//! `data`.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::Taxonomy;

/// The taxonomy labels of a schema document and nothing else. Unlike
/// [`crate::loader::load_schema`] this does not need `meta.id` or any other
/// key, so incomplete documents can still be checked.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyListing {
    meta: MetaTaxonomies,
    data: Vec<RowTaxonomy>,
}

#[derive(Debug, Clone, Deserialize)]
struct MetaTaxonomies {
    taxonomies: Vec<Taxonomy>,
}

#[derive(Debug, Clone, Deserialize)]
struct RowTaxonomy {
    taxonomy: Taxonomy,
}

pub fn load_listing(path: &Path) -> Result<TaxonomyListing> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| Error::parse(path, e))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyReport {
    /// Listed in `meta.taxonomies` but used by no row.
    pub not_in_data: BTreeSet<Taxonomy>,
    /// Used by a row but not listed in `meta.taxonomies`.
    pub not_in_meta: BTreeSet<Taxonomy>,
}

impl TaxonomyReport {
    pub fn is_ok(&self) -> bool {
        self.not_in_data.is_empty() && self.not_in_meta.is_empty()
    }
}

pub fn check_taxonomies(listing: &TaxonomyListing) -> TaxonomyReport {
    let by_meta: BTreeSet<&str> = listing.meta.taxonomies.iter().map(String::as_str).collect();
    let by_data: BTreeSet<&str> = listing.data.iter().map(|row| row.taxonomy.as_str()).collect();
    TaxonomyReport {
        not_in_data: by_meta.difference(&by_data).map(|t| (*t).to_string()).collect(),
        not_in_meta: by_data.difference(&by_meta).map(|t| (*t).to_string()).collect(),
    }
}

impl fmt::Display for TaxonomyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return writeln!(f, "Ok");
        }
        if !self.not_in_data.is_empty() {
            writeln!(f, "Error: The following taxonomies are not in the data")?;
            writeln!(f, "{:?}", self.not_in_data)?;
        }
        if !self.not_in_meta.is_empty() {
            writeln!(f, "Error: The following taxonomies are not in the meta section")?;
            writeln!(f, "{:?}", self.not_in_meta)?;
        }
        Ok(())
    }
}
