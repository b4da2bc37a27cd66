use std::fmt;

/// Whether a kind is a leaf or an internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindClass {
    /// Null, Bool, Number, String
    Simple,
    /// Array, Map
    Collection,
}

impl fmt::Display for KindClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KindClass::Simple => write!(f, "Simple"),
            KindClass::Collection => write!(f, "Collection"),
        }
    }
}

/// The tag identifying a [`crate::Value`] variant.
///
/// The declaration order is the cross-kind ordering used by
/// [`crate::compare`]: Null < Bool < Number < String < Array < Map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Map,
}

impl Kind {
    pub fn class(self) -> KindClass {
        match self {
            Kind::Null | Kind::Bool | Kind::Number | Kind::String => KindClass::Simple,
            Kind::Array | Kind::Map => KindClass::Collection,
        }
    }

    pub fn is_collection(self) -> bool {
        self.class() == KindClass::Collection
    }

    /// Ordinal of an optional kind; absence sorts before every kind.
    pub fn ordinal(kind: Option<Kind>) -> u8 {
        match kind {
            None => 0,
            Some(Kind::Null) => 1,
            Some(Kind::Bool) => 2,
            Some(Kind::Number) => 3,
            Some(Kind::String) => 4,
            Some(Kind::Array) => 5,
            Some(Kind::Map) => 6,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "Null",
            Kind::Bool => "Bool",
            Kind::Number => "Number",
            Kind::String => "String",
            Kind::Array => "Array",
            Kind::Map => "Map",
        };
        f.write_str(name)
    }
}
