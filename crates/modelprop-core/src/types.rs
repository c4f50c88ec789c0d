//! Domain types shared by the loader, filter and writer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type SchemaId = String;
pub type Taxonomy = String;

/// Descriptive header of a schema document.
///
/// - `id`: schema identifier, matches the catalog directory name
/// - `taxonomies`: ordered, set-like list of taxonomy labels
/// - `extra`: every other key (damage states, asset category, ...) kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub id: SchemaId,
    pub taxonomies: Vec<Taxonomy>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One record of the `data` table. Keys are free-form; only `taxonomy` is
/// interpreted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    pub fn taxonomy(&self) -> Option<&str> {
        self.0.get("taxonomy").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Copy of the row with undefined (`null`) values dropped.
    pub fn without_undefined(&self) -> Row {
        Row(self
            .0
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}

/// The two-part `{ meta, data }` document stored per schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub meta: Metadata,
    pub data: Vec<Row>,
}

/// What the caller asked for. Asset and loss category are carried through
/// but do not select anything yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub schema: SchemaId,
    pub asset_category: String,
    pub loss_category: String,
    pub taxonomies: Option<Vec<Taxonomy>>,
}
