//! The query run: check schema, load, filter, write.

use std::path::{Path, PathBuf};

use crate::catalog::DirectoryCatalog;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::filter::filter_taxonomies;
use crate::loader::load_schema;
use crate::traits::SchemaCatalog;
use crate::types::{QueryRequest, Taxonomy};
use crate::writer::write_schema;

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub output_path: PathBuf,
    pub taxonomies: usize,
    pub rows: usize,
}

/// Decode the taxonomy selection given on the command line.
///
/// Expects a JSON array of strings. Anything else is logged and treated as
/// no selection.
pub fn parse_taxonomy_selection(raw: &str) -> Option<Vec<Taxonomy>> {
    match serde_json::from_str::<Vec<Taxonomy>>(raw) {
        Ok(labels) => Some(labels),
        Err(e) => {
            tracing::warn!(input = raw, error = %e, "could not decode taxonomy list, selecting all taxonomies");
            None
        }
    }
}

pub fn run(settings: &Settings, request: &QueryRequest) -> Result<RunOutcome> {
    let catalog = DirectoryCatalog::new(settings.schema_dir());
    run_with_catalog(&catalog, &settings.output_path(), request)
}

pub fn run_with_catalog(catalog: &dyn SchemaCatalog, output_path: &Path, request: &QueryRequest) -> Result<RunOutcome> {
    let supported = catalog.supported();
    if !supported.contains(&request.schema) {
        return Err(Error::UnsupportedSchema {
            schema: request.schema.clone(),
            available: supported.into_iter().collect(),
        });
    }
    tracing::debug!(
        schema = %request.schema,
        asset_category = %request.asset_category,
        loss_category = %request.loss_category,
        "running query"
    );

    let document = load_schema(&catalog.locate(&request.schema))?;
    let result = filter_taxonomies(document, request.taxonomies.as_deref())?;
    write_schema(Some(&result.meta), Some(result.data.as_slice()), output_path)?;

    Ok(RunOutcome {
        output_path: output_path.to_path_buf(),
        taxonomies: result.meta.taxonomies.len(),
        rows: result.data.len(),
    })
}
