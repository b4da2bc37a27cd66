//! Depth-first traversal of value trees.
//!
//! The walker knows nothing about what a tree means. It reports a
//! [`Visit::CollectionStart`] / [`Visit::CollectionEnd`] pair around the
//! children of every collection and a single [`Visit::Leaf`] for every other
//! node, passing the path accumulated so far.
//!
//! A visitor steers the walk through [`Flow`]:
//!
//! - [`Flow::SkipChildren`] at a collection start suppresses its children;
//!   the matching end still fires. Elsewhere it behaves like `Continue`.
//! - [`Flow::Abort`] stops the walk. Pending collection ends still fire while
//!   unwinding, and [`walk`] returns `Ok(())`.
//!
//! A panic inside visitor logic is caught, the pending collection ends fire,
//! and the walk returns [`Error::Panic`].
//!
//! ```
//! use valpath::{walk, Flow, IntoValue, Source, Visit};
//!
//! let doc = serde_json::json!({"x": [1, 2]}).into_value(&Source::Unknown).unwrap();
//! let mut events = Vec::new();
//! walk(&doc, |path, _, visit| {
//!     events.push(format!("{:?} {}", visit, path));
//!     Ok(Flow::Continue)
//! })
//! .unwrap();
//! assert_eq!(events[1], "CollectionStart .x");
//! assert_eq!(events[2], "Leaf .x[0]");
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::{
    error::{Error, Result},
    key::Segment,
    path::Path,
    value::{Node, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    CollectionStart,
    CollectionEnd,
    Leaf,
}

/// What the walker should do after a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    SkipChildren,
    Abort,
}

/// A node the walker can traverse.
pub trait Walkable: Sized {
    fn is_collection(&self) -> bool;

    /// Call `f` for every child in traversal order, stopping at the first
    /// error. Failures of the node itself are converted with `E::from`.
    fn for_each_child<E, F>(&self, f: F) -> std::result::Result<(), E>
    where
        E: From<Error>,
        F: FnMut(Segment, Self) -> std::result::Result<(), E>;
}

impl<'a> Walkable for &'a Value {
    fn is_collection(&self) -> bool {
        self.kind().is_collection()
    }

    fn for_each_child<E, F>(&self, mut f: F) -> std::result::Result<(), E>
    where
        E: From<Error>,
        F: FnMut(Segment, Self) -> std::result::Result<(), E>,
    {
        match *self {
            Value::Array(array) => {
                for (i, child) in array.iter().enumerate() {
                    f(Segment::Index(i as i64), child)?;
                }
            }
            Value::Map(map) => {
                for (name, child) in map.iter() {
                    f(Segment::Field(name.clone()), child)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Why a walk stopped early.
enum Halt {
    Abort,
    Fail(Error),
}

impl From<Error> for Halt {
    fn from(e: Error) -> Self {
        Halt::Fail(e)
    }
}

fn signal(result: Result<Flow>) -> std::result::Result<(), Halt> {
    match result {
        Ok(Flow::Abort) => Err(Halt::Abort),
        Ok(_) => Ok(()),
        Err(e) => Err(Halt::Fail(e)),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn guarded<F>(f: F) -> std::result::Result<(), Halt>
where
    F: FnOnce() -> std::result::Result<(), Halt>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload);
            tracing::debug!(%message, "converted panic during walk");
            Err(Halt::Fail(Error::Panic(message)))
        }
    }
}

fn walk_node<N, V>(node: N, path: &mut Path, visit: &mut V) -> std::result::Result<(), Halt>
where
    N: Walkable,
    V: FnMut(&Path, &N, Visit) -> Result<Flow>,
{
    if !node.is_collection() {
        tracing::trace!(%path, "leaf");
        return signal(visit(path, &node, Visit::Leaf));
    }

    let depth = path.len();
    tracing::trace!(%path, "collection start");
    let outcome = match visit(path, &node, Visit::CollectionStart) {
        Ok(Flow::Continue) => guarded(|| {
            node.for_each_child(|segment, child| {
                path.push(segment);
                let result = walk_node(child, path, visit);
                path.truncate(depth);
                result
            })
        }),
        Ok(Flow::SkipChildren) => Ok(()),
        Ok(Flow::Abort) => Err(Halt::Abort),
        Err(e) => Err(Halt::Fail(e)),
    };

    path.truncate(depth);
    tracing::trace!(%path, "collection end");
    let end = signal(visit(path, &node, Visit::CollectionEnd));
    outcome.and(end)
}

/// Walk any [`Walkable`] tree.
pub fn walk_tree<N, V>(root: N, mut visit: V) -> Result<()>
where
    N: Walkable,
    V: FnMut(&Path, &N, Visit) -> Result<Flow>,
{
    let mut path = Path::root();
    match guarded(|| walk_node(root, &mut path, &mut visit)) {
        Ok(()) | Err(Halt::Abort) => Ok(()),
        Err(Halt::Fail(e)) => Err(e),
    }
}

/// Walk a value tree. Arrays are visited in index order, maps in ascending
/// key order.
pub fn walk<V>(root: &Value, mut visit: V) -> Result<()>
where
    V: FnMut(&Path, &Value, Visit) -> Result<Flow>,
{
    walk_tree(root, |path, node: &&Value, event| visit(path, node, event))
}
