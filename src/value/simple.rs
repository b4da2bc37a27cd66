use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use super::capability::{Mutable, Node, Simple};
use super::{Kind, Source, Value};
use crate::error::ValueError;

static NUMBER_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("number literal pattern is valid")
});

fn mismatch(expected: &'static str, value: &Value) -> ValueError {
    ValueError::KindMismatch {
        expected,
        actual: value.kind(),
    }
}

// ============================================================================
// Null
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Null {
    source: Source,
}

impl Null {
    pub fn new(source: Source) -> Self {
        Null { source }
    }
}

impl Node for Null {
    fn kind(&self) -> Kind {
        Kind::Null
    }

    fn source(&self) -> &Source {
        &self.source
    }

    fn without_source(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}

impl Simple for Null {
    fn render(&self) -> String {
        "null".to_string()
    }

    fn compare_to(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }
}

impl Mutable for Null {
    fn set_value(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::Null(_) => Ok(()),
            other => Err(mismatch("Null", &other)),
        }
    }
}

// ============================================================================
// Bool
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Bool {
    value: bool,
    source: Source,
}

impl Bool {
    pub fn new(value: bool, source: Source) -> Self {
        Bool { value, source }
    }

    pub fn get(&self) -> bool {
        self.value
    }
}

impl Node for Bool {
    fn kind(&self) -> Kind {
        Kind::Bool
    }

    fn source(&self) -> &Source {
        &self.source
    }

    fn without_source(&self) -> serde_json::Value {
        serde_json::Value::Bool(self.value)
    }
}

impl Simple for Bool {
    fn render(&self) -> String {
        self.value.to_string()
    }

    /// false < true
    fn compare_to(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Mutable for Bool {
    fn set_value(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::Bool(b) => {
                self.value = b.value;
                Ok(())
            }
            other => Err(mismatch("Bool", &other)),
        }
    }
}

// ============================================================================
// Number
// ============================================================================

/// A complex number produced by [`Number::complex`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

/// A number stored as its validated decimal literal.
///
/// Accessors parse on demand, each with an explicit bit width, and fail
/// independently when the literal does not fit the requested type.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    literal: String,
    source: Source,
}

impl Number {
    /// Build a number from a decimal literal such as `42`, `-0.5` or `1e10`.
    ///
    /// # Panics
    ///
    /// Panics if `literal` is not a well-formed decimal literal. Constructing
    /// a number is only defined for valid literals: validate with
    /// [`Number::is_valid_literal`] or use [`Number::parse`] for untrusted input.
    pub fn new(literal: impl Into<String>, source: Source) -> Self {
        let literal = literal.into();
        if !Self::is_valid_literal(&literal) {
            panic!("invalid number: {}", literal);
        }
        Number { literal, source }
    }

    /// Checked variant of [`Number::new`].
    pub fn parse(literal: impl Into<String>, source: Source) -> Result<Self, ValueError> {
        let literal = literal.into();
        if Self::is_valid_literal(&literal) {
            Ok(Number { literal, source })
        } else {
            Err(ValueError::InvalidNumber(literal))
        }
    }

    pub fn is_valid_literal(literal: &str) -> bool {
        NUMBER_LITERAL.is_match(literal)
    }

    pub fn from_i64(value: i64, source: Source) -> Self {
        Number {
            literal: value.to_string(),
            source,
        }
    }

    pub fn from_u64(value: u64, source: Source) -> Self {
        Number {
            literal: value.to_string(),
            source,
        }
    }

    /// Returns `None` for NaN and infinities, which have no decimal literal.
    pub fn from_f64(value: f64, source: Source) -> Option<Self> {
        value.is_finite().then(|| Number {
            literal: value.to_string(),
            source,
        })
    }

    pub fn from_decimal(value: Decimal, source: Source) -> Self {
        Number {
            literal: value.to_string(),
            source,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.literal
    }

    fn conversion(&self, target: &'static str) -> ValueError {
        ValueError::NumberConversion {
            literal: self.literal.clone(),
            target,
        }
    }

    /// Signed integer that must fit in `bits` (1..=64).
    pub fn int(&self, bits: u32) -> Result<i64, ValueError> {
        if bits == 0 || bits > 64 {
            return Err(ValueError::InvalidBitWidth(bits));
        }
        let value: i64 = self
            .literal
            .parse()
            .map_err(|_| self.conversion("signed integer"))?;
        if bits < 64 {
            let max = (1i64 << (bits - 1)) - 1;
            let min = -(1i64 << (bits - 1));
            if value < min || value > max {
                return Err(self.conversion("signed integer"));
            }
        }
        Ok(value)
    }

    /// Unsigned integer that must fit in `bits` (1..=64).
    pub fn unsigned(&self, bits: u32) -> Result<u64, ValueError> {
        if bits == 0 || bits > 64 {
            return Err(ValueError::InvalidBitWidth(bits));
        }
        let value: u64 = self
            .literal
            .parse()
            .map_err(|_| self.conversion("unsigned integer"))?;
        if bits < 64 && value >> bits != 0 {
            return Err(self.conversion("unsigned integer"));
        }
        Ok(value)
    }

    /// Floating point value at 32 or 64 bits. Literals that overflow to
    /// infinity are rejected.
    pub fn float(&self, bits: u32) -> Result<f64, ValueError> {
        let value = match bits {
            32 => self
                .literal
                .parse::<f32>()
                .map(f64::from)
                .map_err(|_| self.conversion("float"))?,
            64 => self
                .literal
                .parse::<f64>()
                .map_err(|_| self.conversion("float"))?,
            other => return Err(ValueError::InvalidBitWidth(other)),
        };
        if value.is_infinite() {
            return Err(self.conversion("float"));
        }
        Ok(value)
    }

    /// Complex value at 64 (two f32 parts) or 128 (two f64 parts) bits.
    /// Decimal literals have no imaginary part.
    pub fn complex(&self, bits: u32) -> Result<Complex, ValueError> {
        let re = match bits {
            64 => self.float(32)?,
            128 => self.float(64)?,
            other => return Err(ValueError::InvalidBitWidth(other)),
        };
        Ok(Complex { re, im: 0.0 })
    }

    /// Exact decimal value.
    pub fn decimal(&self) -> Result<Decimal, ValueError> {
        let literal = self.literal.strip_prefix('+').unwrap_or(self.literal.as_str());
        let parsed = if literal.contains(['e', 'E']) {
            Decimal::from_scientific(literal)
        } else {
            Decimal::from_str(literal)
        };
        parsed.map_err(|_| self.conversion("decimal"))
    }

    // Lossy coercion used for ordering.
    fn coerce(&self) -> f64 {
        self.literal.parse().unwrap_or(f64::NAN)
    }
}

impl Node for Number {
    fn kind(&self) -> Kind {
        Kind::Number
    }

    fn source(&self) -> &Source {
        &self.source
    }

    /// Integers that fit 64 bits and finite floats map to JSON numbers. A
    /// literal outside the `f64` range (`1e400`) keeps its text as a JSON
    /// string rather than collapsing to null.
    fn without_source(&self) -> serde_json::Value {
        if let Ok(i) = self.literal.parse::<i64>() {
            serde_json::Value::Number(i.into())
        } else if let Ok(u) = self.literal.parse::<u64>() {
            serde_json::Value::Number(u.into())
        } else {
            serde_json::Number::from_f64(self.coerce())
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(self.literal.clone()))
        }
    }
}

impl Simple for Number {
    fn render(&self) -> String {
        self.literal.clone()
    }

    /// Numeric, not lexicographic: `2 < 10`.
    fn compare_to(&self, other: &Self) -> Ordering {
        self.coerce()
            .partial_cmp(&other.coerce())
            .unwrap_or(Ordering::Equal)
    }
}

impl Mutable for Number {
    fn set_value(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::Number(n) => {
                self.literal = n.literal;
                Ok(())
            }
            other => Err(mismatch("Number", &other)),
        }
    }
}

// ============================================================================
// String
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Str {
    value: String,
    source: Source,
}

impl Str {
    pub fn new(value: impl Into<String>, source: Source) -> Self {
        Str {
            value: value.into(),
            source,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Node for Str {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn source(&self) -> &Source {
        &self.source
    }

    fn without_source(&self) -> serde_json::Value {
        serde_json::Value::String(self.value.clone())
    }
}

impl Simple for Str {
    fn render(&self) -> String {
        self.value.clone()
    }

    fn compare_to(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl Mutable for Str {
    fn set_value(&mut self, value: Value) -> Result<(), ValueError> {
        match value {
            Value::String(s) => {
                self.value = s.value;
                Ok(())
            }
            other => Err(mismatch("String", &other)),
        }
    }
}
