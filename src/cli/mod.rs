//! CLI support for valpath
//!
//! Provides programmatic access to the `valpath` commands so they can be
//! embedded in other tools and tested without spawning the binary.

mod check;
mod diff;
mod get;
mod paths;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use diff::{CompareOptions, DiffOptions, execute_compare, execute_diff};
pub use get::{GetOptions, execute_get};
pub use paths::{PathEntry, PathsOptions, execute_paths};

use std::fs;
use std::io;

use thiserror::Error;

use crate::{IntoValue, Source, Value};

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Path error: {0}")]
    Path(#[from] crate::PathError),

    #[error("Value error: {0}")]
    Value(#[from] crate::ValueError),

    #[error("{0}")]
    Engine(#[from] crate::Error),

    #[error("Invalid JSON in {name}: {source}")]
    Json {
        name: String,
        source: serde_json::Error,
    },

    #[error("IO error reading {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,
}

/// A JSON document together with the name it is reported under.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub source: Source,
}

impl Document {
    pub fn new(text: impl Into<String>, source: Source) -> Self {
        Document {
            text: text.into(),
            source,
        }
    }

    /// Read a document from disk, naming it after `path`.
    pub fn from_file(path: &str) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(Document::new(text, Source::named(path)))
    }

    /// Decode the JSON text into a value tree tagged with this document's
    /// source.
    pub fn parse(&self) -> Result<Value, CliError> {
        let json: serde_json::Value =
            serde_json::from_str(&self.text).map_err(|source| CliError::Json {
                name: self.source.to_string(),
                source,
            })?;
        Ok(json.into_value(&self.source)?)
    }
}
