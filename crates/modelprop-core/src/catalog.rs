//! Discovery of the schemas shipped under the schema directory.
//!
//! A schema `S` is supported when `<schema_dir>/S/S_struct.json` exists.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::traits::SchemaCatalog;
use crate::types::SchemaId;

const STRUCT_SUFFIX: &str = "_struct.json";

/// Catalog backed by a `<dir>/<id>/<id>_struct.json` layout on disk.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    dir: PathBuf,
}

impl DirectoryCatalog {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl SchemaCatalog for DirectoryCatalog {
    fn supported(&self) -> BTreeSet<SchemaId> {
        supported_schemas(&self.dir)
    }

    fn locate(&self, schema: &str) -> PathBuf {
        struct_path(&self.dir, schema)
    }
}

/// Path of the structure file for `schema` under `schema_dir`.
pub fn struct_path(schema_dir: &Path, schema: &str) -> PathBuf {
    schema_dir.join(schema).join(format!("{schema}{STRUCT_SUFFIX}"))
}

/// All schema ids found under `schema_dir`. A missing directory yields an
/// empty set.
pub fn supported_schemas(schema_dir: &Path) -> BTreeSet<SchemaId> {
    let mut schemas = BTreeSet::new();
    for entry in WalkDir::new(schema_dir)
        .min_depth(2)
        .max_depth(2)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        if let Some(id) = schema_id_for(entry.path()) {
            schemas.insert(id);
        }
    }
    tracing::debug!(dir = %schema_dir.display(), count = schemas.len(), "scanned schema catalog");
    schemas
}

fn schema_id_for(file: &Path) -> Option<SchemaId> {
    let file_name = file.file_name()?.to_str()?;
    let parent = file.parent()?.file_name()?.to_str()?;
    let prefix = file_name.strip_suffix(STRUCT_SUFFIX)?;
    (prefix == parent).then(|| parent.to_string())
}
