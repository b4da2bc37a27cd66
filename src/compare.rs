//! Three-way ordering of value trees.
//!
//! Both trees are walked in lockstep. Nodes of different kinds order by
//! kind (an absent side sorts first, then Null < Bool < Number < String <
//! Array < Map) and are not descended into. Leaves of the same kind use the
//! comparator of that kind. The first child pair that is not equal decides
//! the ordering of its collection; trees whose paired nodes are all equal
//! compare `Equal`.

use std::cmp::Ordering;

use crate::{
    error::Result,
    pair::Pair,
    path::Path,
    value::{Kind, Simple, Value},
    walk::{Flow, Visit, walk_tree},
};

/// Order two leaves, or two nodes of different kinds.
fn compare_leaf(pair: &Pair<'_>) -> Ordering {
    match (pair.left, pair.right) {
        (Some(Value::Null(_)), Some(Value::Null(_))) => Ordering::Equal,
        (Some(Value::Bool(l)), Some(Value::Bool(r))) => l.compare_to(r),
        (Some(Value::Number(l)), Some(Value::Number(r))) => l.compare_to(r),
        (Some(Value::String(l)), Some(Value::String(r))) => l.compare_to(r),
        _ => {
            let (left, right) = pair.kinds();
            Kind::ordinal(left).cmp(&Kind::ordinal(right))
        }
    }
}

/// Compare two trees.
///
/// ```
/// use std::cmp::Ordering;
/// use valpath::{compare, IntoValue, Source};
///
/// let two = "2".parse::<serde_json::Value>().unwrap().into_value(&Source::Unknown).unwrap();
/// let ten = "10".parse::<serde_json::Value>().unwrap().into_value(&Source::Unknown).unwrap();
/// assert_eq!(compare(&two, &ten).unwrap(), Ordering::Less);
/// ```
pub fn compare(left: &Value, right: &Value) -> Result<Ordering> {
    compare_with(left, right, |_, _, _, current| current)
}

/// Compare two trees, letting `decide` replace the ordering of any node.
///
/// `decide` runs at every leaf and at the end of every collection with the
/// path, both sides (`None` where a side is absent) and the ordering the
/// engine computed. For a collection that is the ordering of the first
/// differing child, or `Equal`. Whatever `decide` returns becomes the
/// ordering of that node: a non-equal child settles its parent, so the
/// parent's later children are not compared, while returning `Equal` at a
/// collection end lets comparison resume with that collection's siblings.
/// An error from `decide` is returned from `compare_with` unchanged.
///
/// The engine itself cannot fail on value trees, so the ordering handed to
/// `decide` is always `Ok`; the `Result` lets a chained comparator pass its
/// own failures along.
pub fn compare_with<F>(left: &Value, right: &Value, mut decide: F) -> Result<Ordering>
where
    F: FnMut(&Path, Option<&Value>, Option<&Value>, Result<Ordering>) -> Result<Ordering>,
{
    let mut result = Ordering::Equal;
    // One frame per open collection: the ordering of its children so far, or
    // `None` for a collection opened after its parent was already settled.
    let mut frames: Vec<Option<Ordering>> = Vec::new();
    // Set while `decide` runs; stays set if it fails or panics so the
    // collection ends fired during unwinding leave it alone.
    let mut failed = false;
    walk_tree(Pair::new(Some(left), Some(right)), |path, pair, visit| {
        if failed {
            return Ok(Flow::Continue);
        }
        let settled = matches!(frames.last(), Some(Some(o)) if o.is_ne());
        let current = match visit {
            Visit::CollectionStart if settled => {
                frames.push(None);
                return Ok(Flow::SkipChildren);
            }
            Visit::CollectionStart => {
                frames.push(Some(Ordering::Equal));
                return Ok(Flow::Continue);
            }
            Visit::Leaf if settled => return Ok(Flow::Continue),
            Visit::Leaf => compare_leaf(pair),
            Visit::CollectionEnd => match frames.pop().flatten() {
                Some(children) => children,
                None => return Ok(Flow::Continue),
            },
        };
        failed = true;
        let decided = decide(path, pair.left, pair.right, Ok(current))?;
        failed = false;
        match frames.last_mut() {
            Some(Some(parent)) => *parent = decided,
            _ => {
                result = decided;
                tracing::trace!(?result, "comparison finished");
            }
        }
        Ok(Flow::Continue)
    })?;
    Ok(result)
}
