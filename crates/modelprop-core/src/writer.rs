use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::{Metadata, Row};

#[derive(Serialize)]
struct OutputDocument<'a> {
    meta: &'a Metadata,
    data: Vec<Row>,
}

/// Write `meta` and `rows` as a `{ meta, data }` JSON document.
///
/// Either part missing is reported and returned as
/// [`Error::IncompleteDocument`] before anything touches the disk. Undefined
/// values are left out of each row. The parent directory is created on
/// demand.
pub fn write_schema(meta: Option<&Metadata>, rows: Option<&[Row]>, path: &Path) -> Result<()> {
    let (Some(meta), Some(rows)) = (meta, rows) else {
        tracing::warn!(path = %path.display(), "metadata or data are missing, nothing written");
        return Err(Error::IncompleteDocument { path: path.to_path_buf() });
    };

    let document = OutputDocument { meta, data: rows.iter().map(Row::without_undefined).collect() };
    let json = serde_json::to_string_pretty(&document).map_err(|e| Error::parse(path, e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, json).map_err(|e| Error::io(path, e))?;
    tracing::info!(path = %path.display(), rows = document.data.len(), "wrote query output");
    Ok(())
}
