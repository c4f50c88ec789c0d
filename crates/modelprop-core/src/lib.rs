//! modelprop-core
//!
//! Query fragility/vulnerability schemas by taxonomy: discover schemas in a
//! catalog directory, load a `{ meta, data }` document, project it onto a
//! taxonomy selection and write the result back out.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod catalog;
pub mod check;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod query;
pub mod traits;
pub mod types;
pub mod writer;

pub use error::{Error, Result};
