use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("schema {schema} not supported (available: {})", available.join(", "))]
    UnsupportedSchema { schema: String, available: Vec<String> },

    #[error("Failed to parse schema document {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("requested taxonomies not found in schema {schema}: {}", missing.join(", "))]
    UnknownTaxonomies { schema: String, missing: Vec<String> },

    #[error("cannot write {}: metadata or data are missing", path.display())]
    IncompleteDocument { path: PathBuf },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Parse { path: path.into(), reason: reason.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
