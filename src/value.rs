//! # Value model
//!
//! A closed tagged tree over six kinds: Null, Bool, Number, String, Array and
//! Map. Every node carries an opaque [`Source`] that the core propagates but
//! never interprets.
//!
//! Capabilities are expressed as traits implemented per concrete type
//! ([`Simple`] for leaves, [`Sequence`] for arrays, [`Mapping`] for maps and
//! their mutable counterparts) so dispatch is a `match` on [`Value`] rather
//! than a runtime downcast.
//!
//! ## Examples
//!
//! ```
//! use std::collections::BTreeMap;
//! use valpath::value::{Kind, Node, Source, Value};
//!
//! let mut fields = BTreeMap::new();
//! fields.insert("name".to_string(), Value::string("Alice", Source::Unknown));
//! fields.insert("age".to_string(), Value::number("30", Source::Unknown));
//! let doc = Value::map(fields, Source::named("people.json"));
//!
//! assert_eq!(doc.kind(), Kind::Map);
//! assert_eq!(doc.source().to_string(), "people.json");
//! assert_eq!(doc.without_source(), serde_json::json!({"name": "Alice", "age": 30}));
//! ```

pub mod capability;
pub mod collection;
pub mod kind;
pub mod simple;
pub mod source;

use std::collections::BTreeMap;
use std::fmt;

pub use capability::{
    Collection, Mapping, Mutable, MutableMapping, MutableSequence, Node, Sequence, Simple,
};
pub use collection::{Array, Map, normalize_bound, normalize_index};
pub use kind::{Kind, KindClass};
pub use simple::{Bool, Complex, Null, Number, Str};
pub use source::{Position, Source, SourcePosition};

use crate::error::ValueError;

/// A node in a semi-structured data tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null(Null),
    Bool(Bool),
    Number(Number),
    String(Str),
    Array(Array),
    Map(Map),
}

impl Value {
    pub fn null(source: Source) -> Self {
        Value::Null(Null::new(source))
    }

    pub fn bool(value: bool, source: Source) -> Self {
        Value::Bool(Bool::new(value, source))
    }

    /// # Panics
    ///
    /// Panics if `literal` is not a valid decimal literal; see [`Number::new`].
    pub fn number(literal: impl Into<String>, source: Source) -> Self {
        Value::Number(Number::new(literal, source))
    }

    pub fn string(value: impl Into<String>, source: Source) -> Self {
        Value::String(Str::new(value, source))
    }

    pub fn array(elements: Vec<Value>, source: Source) -> Self {
        Value::Array(Array::new(elements, source))
    }

    pub fn map(entries: BTreeMap<String, Value>, source: Source) -> Self {
        Value::Map(Map::new(entries, source))
    }

    pub fn is_collection(&self) -> bool {
        self.kind().is_collection()
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Canonical rendering of a leaf; `None` for collections.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Null(n) => Some(n.render()),
            Value::Bool(b) => Some(b.render()),
            Value::Number(n) => Some(n.render()),
            Value::String(s) => Some(s.render()),
            Value::Array(_) | Value::Map(_) => None,
        }
    }

    /// Number of children for collections.
    pub fn child_count(&self) -> Option<usize> {
        match self {
            Value::Array(a) => Some(a.len()),
            Value::Map(m) => Some(m.len()),
            _ => None,
        }
    }

    pub(crate) fn expect_array(&self) -> Result<&Array, ValueError> {
        self.as_array().ok_or(ValueError::KindMismatch {
            expected: "Array",
            actual: self.kind(),
        })
    }

    pub(crate) fn expect_map(&self) -> Result<&Map, ValueError> {
        self.as_map().ok_or(ValueError::KindMismatch {
            expected: "Map",
            actual: self.kind(),
        })
    }
}

impl Node for Value {
    fn kind(&self) -> Kind {
        match self {
            Value::Null(n) => n.kind(),
            Value::Bool(b) => b.kind(),
            Value::Number(n) => n.kind(),
            Value::String(s) => s.kind(),
            Value::Array(a) => a.kind(),
            Value::Map(m) => m.kind(),
        }
    }

    fn source(&self) -> &Source {
        match self {
            Value::Null(n) => n.source(),
            Value::Bool(b) => b.source(),
            Value::Number(n) => n.source(),
            Value::String(s) => s.source(),
            Value::Array(a) => a.source(),
            Value::Map(m) => m.source(),
        }
    }

    fn without_source(&self) -> serde_json::Value {
        match self {
            Value::Null(n) => n.without_source(),
            Value::Bool(b) => b.without_source(),
            Value::Number(n) => n.without_source(),
            Value::String(s) => s.without_source(),
            Value::Array(a) => a.without_source(),
            Value::Map(m) => m.without_source(),
        }
    }
}

impl Mutable for Value {
    /// Replaces this node outright, whatever the kinds involved.
    fn set_value(&mut self, value: Value) -> Result<(), ValueError> {
        *self = value;
        Ok(())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Some(text) => f.write_str(&text),
            None => write!(f, "{}", self.without_source()),
        }
    }
}
