use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::SchemaDocument;

/// Read a fragility/vulnerability schema from a JSON file.
///
/// The file holds two sections: `meta` (schema id, taxonomy list, damage
/// states and other descriptive keys) and `data` (one record per taxonomy
/// with the lognormal parameters). Rows stay in file order.
pub fn load_schema(path: &Path) -> Result<SchemaDocument> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let document = parse_schema(&content).map_err(|reason| Error::parse(path, reason))?;
    tracing::info!(
        path = %path.display(),
        schema = %document.meta.id,
        rows = document.data.len(),
        "loaded schema"
    );
    Ok(document)
}

fn parse_schema(content: &str) -> std::result::Result<SchemaDocument, String> {
    let document: SchemaDocument = serde_json::from_str(content).map_err(|e| e.to_string())?;
    if let Some(index) = document.data.iter().position(|row| row.taxonomy().is_none()) {
        return Err(format!("data row {index} has no string `taxonomy` field"));
    }
    Ok(document)
}
