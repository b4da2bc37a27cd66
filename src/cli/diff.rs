//! Compare and diff two JSON documents

use std::cmp::Ordering;

use super::{CliError, Document};
use crate::{Difference, compare, differences};

/// Options for the diff command
#[derive(Debug, Clone)]
pub struct DiffOptions {
    pub left: Document,
    pub right: Document,
}

/// Options for the compare command
#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub left: Document,
    pub right: Document,
}

/// Every structural difference between the two documents
pub fn execute_diff(options: &DiffOptions) -> Result<Vec<Difference>, CliError> {
    let left = options.left.parse()?;
    let right = options.right.parse()?;
    Ok(differences(&left, &right)?)
}

/// Ordering of the left document relative to the right one
pub fn execute_compare(options: &CompareOptions) -> Result<Ordering, CliError> {
    let left = options.left.parse()?;
    let right = options.right.parse()?;
    Ok(compare(&left, &right)?)
}
