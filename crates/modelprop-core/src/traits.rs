use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::types::SchemaId;

pub trait SchemaCatalog {
    fn supported(&self) -> BTreeSet<SchemaId>;
    fn locate(&self, schema: &str) -> PathBuf;
}
