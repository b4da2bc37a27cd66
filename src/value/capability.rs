//! Capability contracts implemented by the concrete value types.
//!
//! Read capabilities are always honoured by the built-in types. Mutation
//! capabilities return `Result` so that an implementation may decline an
//! operation with [`ValueError::Unsupported`] without breaking the read side.

use std::cmp::Ordering;

use super::{Kind, Source, Value};
use crate::error::ValueError;
use crate::key::Segment;

/// Shared by every value.
pub trait Node {
    fn kind(&self) -> Kind;

    fn source(&self) -> &Source;

    /// Deep, source-stripped plain representation.
    fn without_source(&self) -> serde_json::Value;
}

/// Leaf values: Null, Bool, Number and String.
pub trait Simple: Node {
    /// Canonical string rendering, used by diff.
    fn render(&self) -> String;

    fn compare_to(&self, other: &Self) -> Ordering
    where
        Self: Sized;
}

/// Internal nodes: Array and Map.
pub trait Collection: Node {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every child with the segment addressing it. Arrays visit in
    /// index order, maps in ascending key order. The first error stops the
    /// iteration and is returned.
    fn for_each<E, F>(&self, f: F) -> Result<(), E>
    where
        F: FnMut(Segment, &Value) -> Result<(), E>;
}

pub trait Sequence: Collection {
    /// Element at `index`; negative indices count from the end.
    fn index(&self, index: i64) -> Result<&Value, ValueError>;
}

pub trait Mapping: Collection {
    fn field(&self, name: &str) -> Result<&Value, ValueError>;
}

pub trait Mutable {
    fn set_value(&mut self, value: Value) -> Result<(), ValueError>;
}

pub trait MutableSequence: Sequence + Mutable {
    fn set_index(&mut self, index: i64, value: Value) -> Result<(), ValueError>;

    /// Append and return the index of the new element.
    fn append(&mut self, value: Value) -> Result<usize, ValueError>;
}

pub trait MutableMapping: Mapping + Mutable {
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), ValueError>;
}
