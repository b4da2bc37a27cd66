use std::collections::BTreeMap;

use super::capability::{
    Collection, Mapping, Mutable, MutableMapping, MutableSequence, Node, Sequence,
};
use super::{Kind, Source, Value};
use crate::error::ValueError;
use crate::key::Segment;

/// Resolve a possibly negative index against `length`.
///
/// Negative indices count from the end (`-1` is the last element). The
/// result must lie in `[0, length)`; otherwise the original index is reported
/// as out of range.
///
/// ```
/// use valpath::value::normalize_index;
///
/// assert_eq!(normalize_index(-1, 3).unwrap(), 2);
/// assert!(normalize_index(3, 3).is_err());
/// ```
pub fn normalize_index(index: i64, length: usize) -> Result<usize, ValueError> {
    let out_of_range = ValueError::OutOfRange { index };
    let length = i64::try_from(length).map_err(|_| out_of_range.clone())?;
    let resolved = if index < 0 { length + index } else { index };
    if resolved < 0 || resolved >= length {
        return Err(out_of_range);
    }
    Ok(resolved as usize)
}

/// Like [`normalize_index`] but for slice bounds, where `length` itself is a
/// valid position.
pub fn normalize_bound(bound: i64, length: usize) -> Result<usize, ValueError> {
    if i64::try_from(length).is_ok_and(|len| bound == len) {
        return Ok(length);
    }
    if bound == 0 {
        return Ok(0);
    }
    normalize_index(bound, length).map_err(|_| ValueError::OutOfRange { index: bound })
}

// ============================================================================
// Array
// ============================================================================

/// Owned, 0-indexed sequence of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    elements: Vec<Value>,
    source: Source,
}

impl Array {
    pub fn new(elements: Vec<Value>, source: Source) -> Self {
        Array { elements, source }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.elements.iter()
    }

    /// Element at a non-negative position, without normalisation.
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.elements.get(position)
    }

    pub fn index_mut(&mut self, index: i64) -> Result<&mut Value, ValueError> {
        let position = normalize_index(index, self.elements.len())?;
        Ok(&mut self.elements[position])
    }

    /// Copy of the elements in `[start, end)`; `end == None` runs to the end.
    /// Both bounds may be negative.
    pub fn slice(&self, start: i64, end: Option<i64>) -> Result<Array, ValueError> {
        let length = self.elements.len();
        let from = normalize_bound(start, length)?;
        let to = match end {
            Some(end) => normalize_bound(end, length)?,
            None => length,
        };
        if to < from {
            return Err(ValueError::OutOfRange {
                index: end.unwrap_or(start),
            });
        }
        Ok(Array::new(
            self.elements[from..to].to_vec(),
            self.source.clone(),
        ))
    }

    pub fn into_elements(self) -> Vec<Value> {
        self.elements
    }
}

impl Node for Array {
    fn kind(&self) -> Kind {
        Kind::Array
    }

    fn source(&self) -> &Source {
        &self.source
    }

    fn without_source(&self) -> serde_json::Value {
        serde_json::Value::Array(self.elements.iter().map(Node::without_source).collect())
    }
}

impl Collection for Array {
    fn len(&self) -> usize {
        self.elements.len()
    }

    fn for_each<E, F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(Segment, &Value) -> Result<(), E>,
    {
        for (i, element) in self.elements.iter().enumerate() {
            f(Segment::Index(i as i64), element)?;
        }
        Ok(())
    }
}

impl Sequence for Array {
    fn index(&self, index: i64) -> Result<&Value, ValueError> {
        let position = normalize_index(index, self.elements.len())?;
        Ok(&self.elements[position])
    }
}

impl Mutable for Array {
    fn set_value(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::Array(other) => {
                self.elements = other.elements;
                Ok(())
            }
            other => Err(ValueError::KindMismatch {
                expected: "Array",
                actual: other.kind(),
            }),
        }
    }
}

impl MutableSequence for Array {
    fn set_index(&mut self, index: i64, value: Value) -> Result<(), ValueError> {
        *self.index_mut(index)? = value;
        Ok(())
    }

    fn append(&mut self, value: Value) -> Result<usize, ValueError> {
        self.elements.push(value);
        Ok(self.elements.len() - 1)
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Map
// ============================================================================

/// Owned mapping from string key to value, iterated in ascending key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    entries: BTreeMap<String, Value>,
    source: Source,
}

impl Map {
    pub fn new(entries: BTreeMap<String, Value>, source: Source) -> Self {
        Map { entries, source }
    }

    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Result<&mut Value, ValueError> {
        self.entries
            .get_mut(name)
            .ok_or_else(|| ValueError::FieldNotFound(name.to_string()))
    }

    pub fn into_entries(self) -> BTreeMap<String, Value> {
        self.entries
    }
}

impl Node for Map {
    fn kind(&self) -> Kind {
        Kind::Map
    }

    fn source(&self) -> &Source {
        &self.source
    }

    fn without_source(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.without_source()))
                .collect(),
        )
    }
}

impl Collection for Map {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn for_each<E, F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(Segment, &Value) -> Result<(), E>,
    {
        for (name, child) in &self.entries {
            f(Segment::Field(name.clone()), child)?;
        }
        Ok(())
    }
}

impl Mapping for Map {
    fn field(&self, name: &str) -> Result<&Value, ValueError> {
        self.entries
            .get(name)
            .ok_or_else(|| ValueError::FieldNotFound(name.to_string()))
    }
}

impl Mutable for Map {
    fn set_value(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::Map(other) => {
                self.entries = other.entries;
                Ok(())
            }
            other => Err(ValueError::KindMismatch {
                expected: "Map",
                actual: other.kind(),
            }),
        }
    }
}

impl MutableMapping for Map {
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), ValueError> {
        self.entries.insert(name.to_string(), value);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
