//! Compiled path expressions and their evaluation.
//!
//! A [`Path`] is an ordered list of [`Segment`]s. The empty path is the root
//! and renders as `"."`; any other path renders as the concatenation of its
//! segments, so it always starts with `.` or `[`.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::{
    error::{PathError, ValueError},
    key::Segment,
    lexer::Lexer,
    parser::Parser,
    value::{Mapping, MutableMapping, MutableSequence, Node, Sequence, Value},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn root() -> Self {
        Path::default()
    }

    /// Compile a path expression.
    ///
    /// ```
    /// use valpath::{Path, Segment};
    ///
    /// let path = Path::compile(".spec.ports[0:2]").unwrap();
    /// assert_eq!(path.segments()[0], Segment::field("spec"));
    /// assert!(Path::compile(".spec ports").is_err());
    /// ```
    pub fn compile(text: &str) -> Result<Path, PathError> {
        let mut parser = Parser::new(Lexer::new(text))?;
        let path = parser.parse()?;
        tracing::debug!(expression = text, segments = path.len(), "compiled path");
        Ok(path)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// A new path with `segment` appended.
    pub fn join(&self, segment: impl Into<Segment>) -> Path {
        let mut joined = self.clone();
        joined.push(segment.into());
        joined
    }

    pub(crate) fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.segments.truncate(len);
    }

    // Rendering of segments[..=failed], naming how far evaluation got.
    fn evaluation_error(&self, failed: usize, cause: ValueError) -> PathError {
        let path = self.segments[..=failed]
            .iter()
            .map(Segment::to_string)
            .collect();
        PathError::Evaluation { path, cause }
    }

    /// Address a sub-value of `root`.
    ///
    /// Field and index steps borrow from `root`; a range step builds a new
    /// array, after which the result is owned.
    pub fn evaluate<'v>(&self, root: &'v Value) -> Result<Cow<'v, Value>, PathError> {
        let mut current = Cow::Borrowed(root);
        for (n, segment) in self.segments.iter().enumerate() {
            current = match current {
                Cow::Borrowed(value) => step(value, segment),
                Cow::Owned(value) => step(&value, segment).map(|v| Cow::Owned(v.into_owned())),
            }
            .map_err(|cause| self.evaluation_error(n, cause))?;
        }
        Ok(current)
    }

    /// Mutable access to the addressed value. Range segments are rejected
    /// because they do not address a single stored value.
    pub fn evaluate_mut<'v>(&self, root: &'v mut Value) -> Result<&'v mut Value, PathError> {
        let mut current = root;
        for (n, segment) in self.segments.iter().enumerate() {
            current = step_mut(current, segment).map_err(|cause| self.evaluation_error(n, cause))?;
        }
        Ok(current)
    }

    /// Store `value` at this path.
    ///
    /// The parent must exist. A field step inserts or replaces the entry;
    /// an index step replaces an existing element. Setting the root
    /// replaces `root` itself.
    pub fn set(&self, root: &mut Value, value: Value) -> Result<(), PathError> {
        let Some((last, parents)) = self.segments.split_last() else {
            *root = value;
            return Ok(());
        };
        let parent_path = Path {
            segments: parents.to_vec(),
        };
        let parent = parent_path.evaluate_mut(root)?;
        let failed = self.segments.len() - 1;
        let result = match (parent, last) {
            (Value::Map(map), Segment::Field(name)) => map.set_field(name, value),
            (Value::Array(array), Segment::Index(index)) => array.set_index(*index, value),
            (_, Segment::Range { .. }) => Err(ValueError::Unsupported(
                "setting a range of elements".to_string(),
            )),
            (other, segment) => Err(kind_mismatch(other, segment)),
        };
        result.map_err(|cause| self.evaluation_error(failed, cause))
    }
}

fn kind_mismatch(value: &Value, segment: &Segment) -> ValueError {
    let expected = match segment {
        Segment::Field(_) => "Map",
        Segment::Index(_) | Segment::Range { .. } => "Array",
    };
    ValueError::KindMismatch {
        expected,
        actual: value.kind(),
    }
}

/// Apply one segment: maps take fields, arrays take indices and ranges,
/// every other kind fails.
fn step<'v>(value: &'v Value, segment: &Segment) -> Result<Cow<'v, Value>, ValueError> {
    match (value, segment) {
        (Value::Map(map), Segment::Field(name)) => map.field(name).map(Cow::Borrowed),
        (Value::Array(array), Segment::Index(index)) => array.index(*index).map(Cow::Borrowed),
        (Value::Array(array), Segment::Range { start, end }) => array
            .slice(*start, *end)
            .map(|slice| Cow::Owned(Value::Array(slice))),
        (other, segment) => Err(kind_mismatch(other, segment)),
    }
}

fn step_mut<'v>(value: &'v mut Value, segment: &Segment) -> Result<&'v mut Value, ValueError> {
    match (value, segment) {
        (Value::Map(map), Segment::Field(name)) => map.field_mut(name),
        (Value::Array(array), Segment::Index(index)) => array.index_mut(*index),
        (_, Segment::Range { .. }) => Err(ValueError::Unsupported(
            "mutable access through a range".to_string(),
        )),
        (other, segment) => Err(kind_mismatch(other, segment)),
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str(".");
        }
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::compile(s)
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Path {
            segments: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Path { segments }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
