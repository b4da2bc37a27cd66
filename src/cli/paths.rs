//! List the paths present in a JSON document

use super::{CliError, Document};
use crate::value::Node;
use crate::{Flow, Kind, Visit, walk};

/// Options for the paths command
#[derive(Debug, Clone)]
pub struct PathsOptions {
    pub input: Option<Document>,
    /// Also list collections, not only leaves
    pub collections: bool,
}

/// One addressable location
#[derive(Debug, Clone, PartialEq)]
pub struct PathEntry {
    /// Canonical path, re-parseable by `Path::compile`
    pub path: String,
    pub kind: Kind,
}

/// Walk the document and list every leaf path (and optionally every
/// collection path) in walk order
pub fn execute_paths(options: &PathsOptions) -> Result<Vec<PathEntry>, CliError> {
    let document = options.input.as_ref().ok_or(CliError::NoInput)?;
    let root = document.parse()?;

    let mut entries = Vec::new();
    walk(&root, |path, value, visit| {
        let wanted = match visit {
            Visit::Leaf => true,
            Visit::CollectionStart => options.collections,
            Visit::CollectionEnd => false,
        };
        if wanted {
            entries.push(PathEntry {
                path: path.to_string(),
                kind: value.kind(),
            });
        }
        Ok(Flow::Continue)
    })?;
    Ok(entries)
}
