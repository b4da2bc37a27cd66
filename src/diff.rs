//! Structural differences between two value trees.
//!
//! Children are paired the same way the comparison engine pairs them.
//! A difference is reported for:
//!
//! - nodes whose kinds differ, including a node present on one side only
//!   (the subtree is not descended into);
//! - leaves of the same kind whose canonical renderings differ.
//!
//! Null against Null is never a difference.

use crate::{
    error::Result,
    pair::Pair,
    path::Path,
    value::Value,
    walk::{Flow, Visit, walk_tree},
};

/// Walk `left` and `right` together, calling `handler` with the path and both
/// sides of every difference. An error from `handler` stops the diff and is
/// returned.
///
/// ```
/// use valpath::{diff, IntoValue, Source};
///
/// let left = serde_json::json!({"a": 1, "b": 2}).into_value(&Source::Unknown).unwrap();
/// let right = serde_json::json!({"a": 1, "b": 3}).into_value(&Source::Unknown).unwrap();
///
/// let mut paths = Vec::new();
/// diff(&left, &right, |path, _, _| {
///     paths.push(path.to_string());
///     Ok(())
/// })
/// .unwrap();
/// assert_eq!(paths, vec![".b"]);
/// ```
pub fn diff<F>(left: &Value, right: &Value, mut handler: F) -> Result<()>
where
    F: FnMut(&Path, Option<&Value>, Option<&Value>) -> Result<()>,
{
    walk_tree(Pair::new(Some(left), Some(right)), |path, pair, visit| {
        if visit != Visit::Leaf {
            return Ok(Flow::Continue);
        }
        let (left_kind, right_kind) = pair.kinds();
        let differs = if left_kind != right_kind {
            true
        } else {
            match (pair.left, pair.right) {
                (Some(l), Some(r)) => l.render() != r.render(),
                _ => false,
            }
        };
        if differs {
            tracing::trace!(%path, ?left_kind, ?right_kind, "difference");
            handler(path, pair.left, pair.right)?;
        }
        Ok(Flow::Continue)
    })
}

/// One reported difference, detached from the trees it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    pub path: Path,
    pub left: Option<Value>,
    pub right: Option<Value>,
}

/// Collect every difference between `left` and `right`, in walk order.
pub fn differences(left: &Value, right: &Value) -> Result<Vec<Difference>> {
    let mut found = Vec::new();
    diff(left, right, |path, l, r| {
        found.push(Difference {
            path: path.clone(),
            left: l.cloned(),
            right: r.cloned(),
        });
        Ok(())
    })?;
    Ok(found)
}
