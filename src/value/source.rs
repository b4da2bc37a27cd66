use std::fmt;
use std::sync::Arc;

/// Opaque provenance handle carried by every value.
///
/// The core never interprets it; it only propagates it. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Source {
    #[default]
    Unknown,
    /// A named origin such as a file name.
    Named(Arc<str>),
    Position(SourcePosition),
}

impl Source {
    pub fn named(name: impl AsRef<str>) -> Self {
        Source::Named(Arc::from(name.as_ref()))
    }

    /// Position information, if this source carries any.
    pub fn position(&self) -> Option<Position> {
        match self {
            Source::Position(sp) => Some(sp.position),
            _ => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Unknown => write!(f, "<unknown>"),
            Source::Named(name) => write!(f, "{}", name),
            Source::Position(sp) => write!(f, "{}", sp),
        }
    }
}

/// 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A position inside a named (or anonymous) origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePosition {
    origin: Option<Arc<str>>,
    position: Position,
}

impl SourcePosition {
    /// Start tracking positions within `source`.
    ///
    /// If `source` already carries a position it is copied, otherwise
    /// tracking starts at line 1, column 1.
    pub fn new(source: &Source) -> Self {
        let start = Position { line: 1, column: 1 };
        match source {
            Source::Position(sp) => sp.clone(),
            Source::Named(name) => SourcePosition {
                origin: Some(Arc::clone(name)),
                position: start,
            },
            Source::Unknown => SourcePosition {
                origin: None,
                position: start,
            },
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move forward by `delta`. Crossing at least one line resets the column
    /// before the column delta is applied.
    pub fn advance(&mut self, delta: Position) {
        self.position.line += delta.line;
        if delta.line > 0 {
            self.position.column = 1;
        }
        self.position.column += delta.column;
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Position { line, column } = self.position;
        match &self.origin {
            Some(origin) => write!(f, "{} [Ln={},Col={}]", origin, line, column),
            None => write!(f, "[Ln={},Col={}]", line, column),
        }
    }
}

impl From<SourcePosition> for Source {
    fn from(sp: SourcePosition) -> Self {
        Source::Position(sp)
    }
}
