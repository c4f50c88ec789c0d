//! Projection of a schema document onto a set of taxonomies.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::types::{Row, SchemaDocument, Taxonomy};

/// Restrict `document` to the `selected` taxonomies.
///
/// `None` or an empty selection returns the document unchanged. Otherwise
/// every selected label must be listed in `meta.taxonomies`; the result has
/// `meta.taxonomies` set to the deduplicated selection and its rows grouped
/// in selection order, keeping file order within a label.
pub fn filter_taxonomies(document: SchemaDocument, selected: Option<&[Taxonomy]>) -> Result<SchemaDocument> {
    let selected = match selected {
        Some(labels) if !labels.is_empty() => dedup(labels),
        _ => return Ok(document),
    };

    let known: HashSet<&str> = document.meta.taxonomies.iter().map(String::as_str).collect();
    let missing: Vec<Taxonomy> = selected.iter().filter(|t| !known.contains(t.as_str())).cloned().collect();
    if !missing.is_empty() {
        return Err(Error::UnknownTaxonomies { schema: document.meta.id, missing });
    }

    let SchemaDocument { mut meta, data } = document;
    let mut rows: Vec<Row> = Vec::with_capacity(data.len());
    for label in &selected {
        let before = rows.len();
        rows.extend(data.iter().filter(|row| row.taxonomy() == Some(label.as_str())).cloned());
        if rows.len() == before {
            tracing::warn!(schema = %meta.id, taxonomy = %label, "selected taxonomy has no data rows");
        }
    }
    tracing::debug!(schema = %meta.id, taxonomies = selected.len(), rows = rows.len(), "filtered schema");

    meta.taxonomies = selected;
    Ok(SchemaDocument { meta, data: rows })
}

fn dedup(labels: &[Taxonomy]) -> Vec<Taxonomy> {
    let mut seen = HashSet::new();
    labels.iter().filter(|l| seen.insert(*l)).cloned().collect()
}
