//! Validate path expressions

use super::CliError;
use crate::Path;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The path expression to validate
    pub path: String,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    /// Canonical rendering of the compiled path
    pub canonical: String,
    /// Number of segments
    pub segments: usize,
}

/// Compile a path expression and report its canonical form
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let path = Path::compile(&options.path)?;
    Ok(CheckResult {
        canonical: path.to_string(),
        segments: path.len(),
    })
}
