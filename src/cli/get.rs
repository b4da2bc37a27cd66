//! Evaluate a path against a JSON document

use super::{CliError, Document};
use crate::Path;
use crate::value::Node;

/// Options for the get command
#[derive(Debug, Clone)]
pub struct GetOptions {
    /// The path expression to evaluate
    pub path: String,
    /// The document to evaluate it against
    pub input: Option<Document>,
}

/// Evaluate `options.path` and return the addressed value as plain JSON
pub fn execute_get(options: &GetOptions) -> Result<serde_json::Value, CliError> {
    // Compile before touching the input so syntax errors win.
    let path = Path::compile(&options.path)?;
    let document = options.input.as_ref().ok_or(CliError::NoInput)?;
    let root = document.parse()?;
    let found = path.evaluate(&root)?;
    Ok(found.without_source())
}
