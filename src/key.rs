use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("identifier pattern is valid")
});

/// Whether `name` can be written as `.name` in a path expression.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// One step of a [`crate::Path`].
///
/// Segments only address; evaluating them is the job of
/// [`crate::Path::evaluate`], which dispatches on the kind of the current value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Map entry by name.
    ///
    /// # Examples
    /// - `.name` → `Field("name")`
    /// - `["content-type"]` → `Field("content-type")`
    Field(String),

    /// Array element by index; negative indices count from the end.
    ///
    /// # Examples
    /// - `[0]` → `Index(0)`
    /// - `[-1]` → `Index(-1)`
    Index(i64),

    /// Contiguous sub-range `[start, end)` of an array. `end == None` means
    /// "to the end of the array".
    ///
    /// # Examples
    /// - `[1:3]` → `Range { start: 1, end: Some(3) }`
    /// - `[2:]` → `Range { start: 2, end: None }`
    /// - `[:]`, `[]`, `[*]` → `Range { start: 0, end: None }`
    Range { start: i64, end: Option<i64> },
}

impl Segment {
    pub fn field(name: impl Into<String>) -> Self {
        Segment::Field(name.into())
    }

    /// The full range `[:]`.
    pub fn all() -> Self {
        Segment::Range {
            start: 0,
            end: None,
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    f.write_str("[\"")?;
    for ch in name.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            other => write!(f, "{}", other)?,
        }
    }
    f.write_str("\"]")
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) if is_identifier(name) => write!(f, ".{}", name),
            Segment::Field(name) => write_quoted(f, name),
            Segment::Index(index) => write!(f, "[{}]", index),
            Segment::Range { start, end } => {
                f.write_str("[")?;
                if *start != 0 {
                    write!(f, "{}", start)?;
                }
                f.write_str(":")?;
                if let Some(end) = end {
                    write!(f, "{}", end)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Segment::Field(name.to_string())
    }
}

impl From<String> for Segment {
    fn from(name: String) -> Self {
        Segment::Field(name)
    }
}

impl From<i64> for Segment {
    fn from(index: i64) -> Self {
        Segment::Index(index)
    }
}
