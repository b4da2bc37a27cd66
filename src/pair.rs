//! Synchronised view over two optional values, walked by the comparison and
//! diff engines.
//!
//! Both engines pair children the same way: arrays by index up to the longer
//! length, maps by the sorted union of both key sets. A side that has no
//! counterpart is absent (`None`). Pairing does not depend on which tree is
//! on the left, so `compare(a, b)` is always the reverse of `compare(b, a)`.

use std::collections::BTreeSet;

use crate::{
    error::{Error, ValueError},
    key::Segment,
    value::{Kind, Node, Value},
    walk::Walkable,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Pair<'a> {
    pub left: Option<&'a Value>,
    pub right: Option<&'a Value>,
}

impl<'a> Pair<'a> {
    pub fn new(left: Option<&'a Value>, right: Option<&'a Value>) -> Self {
        Pair { left, right }
    }

    pub fn kinds(&self) -> (Option<Kind>, Option<Kind>) {
        (self.left.map(Node::kind), self.right.map(Node::kind))
    }

    /// The shared kind, if both sides are present with the same kind.
    pub fn kind(&self) -> Option<Kind> {
        match self.kinds() {
            (Some(l), Some(r)) if l == r => Some(l),
            _ => None,
        }
    }

    /// Child pair for a map entry. A present side that is not a map is an
    /// error; a missing key leaves that side absent.
    pub fn field(&self, name: &str) -> Result<Pair<'a>, ValueError> {
        let side = |value: Option<&'a Value>| -> Result<Option<&'a Value>, ValueError> {
            match value {
                Some(v) => Ok(v.expect_map()?.get(name)),
                None => Ok(None),
            }
        };
        Ok(Pair::new(side(self.left)?, side(self.right)?))
    }

    /// Child pair for an array position. A present side that is not an array
    /// is an error; a position past the end leaves that side absent.
    pub fn index(&self, position: usize) -> Result<Pair<'a>, ValueError> {
        let side = |value: Option<&'a Value>| -> Result<Option<&'a Value>, ValueError> {
            match value {
                Some(v) => Ok(v.expect_array()?.get(position)),
                None => Ok(None),
            }
        };
        Ok(Pair::new(side(self.left)?, side(self.right)?))
    }
}

impl<'a> Walkable for Pair<'a> {
    /// Only pairs whose sides are the same collection kind have children;
    /// mismatched or absent sides are leaves.
    fn is_collection(&self) -> bool {
        self.kind().is_some_and(Kind::is_collection)
    }

    fn for_each_child<E, F>(&self, mut f: F) -> Result<(), E>
    where
        E: From<Error>,
        F: FnMut(Segment, Self) -> Result<(), E>,
    {
        match (self.left, self.right) {
            (Some(Value::Array(left)), Some(Value::Array(right))) => {
                for position in 0..left.iter().len().max(right.iter().len()) {
                    let child = self.index(position).map_err(Error::from)?;
                    f(Segment::Index(position as i64), child)?;
                }
            }
            (Some(Value::Map(left)), Some(Value::Map(right))) => {
                let names: BTreeSet<&str> = left.keys().chain(right.keys()).collect();
                for name in names {
                    let child = self.field(name).map_err(Error::from)?;
                    f(Segment::field(name), child)?;
                }
            }
            _ => {
                return Err(Error::from(ValueError::KindMismatch {
                    expected: "matching collections",
                    actual: self.left.or(self.right).map_or(Kind::Null, Node::kind),
                })
                .into());
            }
        }
        Ok(())
    }
}
