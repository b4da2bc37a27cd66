//! Lifting native Rust data into [`Value`] trees.
//!
//! [`IntoValue`] is the single adapter boundary between other data shapes
//! and the value model. Every node produced by one conversion carries the
//! [`Source`] passed in. Optional and boxed wrappers are unwrapped; `None`
//! and `()` become Null.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::{
    error::ValueError,
    value::{Number, Source, Value},
};

/// Conversion of a native value into a [`Value`] tree.
pub trait IntoValue {
    fn into_value(self, source: &Source) -> Result<Value, ValueError>;
}

impl IntoValue for Value {
    fn into_value(self, _source: &Source) -> Result<Value, ValueError> {
        Ok(self)
    }
}

impl IntoValue for serde_json::Value {
    fn into_value(self, source: &Source) -> Result<Value, ValueError> {
        match self {
            serde_json::Value::Null => Ok(Value::null(source.clone())),
            serde_json::Value::Bool(b) => Ok(Value::bool(b, source.clone())),
            serde_json::Value::Number(n) => {
                Number::parse(n.to_string(), source.clone()).map(Value::Number)
            }
            serde_json::Value::String(s) => Ok(Value::string(s, source.clone())),
            serde_json::Value::Array(items) => items.into_value(source),
            serde_json::Value::Object(entries) => {
                let entries = entries
                    .into_iter()
                    .map(|(k, v)| Ok((k, v.into_value(source)?)))
                    .collect::<Result<BTreeMap<_, _>, ValueError>>()?;
                Ok(Value::map(entries, source.clone()))
            }
        }
    }
}

impl IntoValue for () {
    fn into_value(self, source: &Source) -> Result<Value, ValueError> {
        Ok(Value::null(source.clone()))
    }
}

impl IntoValue for bool {
    fn into_value(self, source: &Source) -> Result<Value, ValueError> {
        Ok(Value::bool(self, source.clone()))
    }
}

macro_rules! signed_into_value {
    ($($t:ty),*) => {
        $(impl IntoValue for $t {
            fn into_value(self, source: &Source) -> Result<Value, ValueError> {
                Ok(Value::Number(Number::from_i64(i64::from(self), source.clone())))
            }
        })*
    };
}

macro_rules! unsigned_into_value {
    ($($t:ty),*) => {
        $(impl IntoValue for $t {
            fn into_value(self, source: &Source) -> Result<Value, ValueError> {
                Ok(Value::Number(Number::from_u64(u64::from(self), source.clone())))
            }
        })*
    };
}

// Types with no lossless `From` into i64/u64 go through their decimal text.
macro_rules! wide_into_value {
    ($($t:ty),*) => {
        $(impl IntoValue for $t {
            fn into_value(self, source: &Source) -> Result<Value, ValueError> {
                Number::parse(self.to_string(), source.clone()).map(Value::Number)
            }
        })*
    };
}

signed_into_value!(i8, i16, i32, i64);
unsigned_into_value!(u8, u16, u32, u64);
wide_into_value!(i128, u128, isize, usize);

impl IntoValue for f64 {
    fn into_value(self, source: &Source) -> Result<Value, ValueError> {
        Number::from_f64(self, source.clone())
            .map(Value::Number)
            .ok_or_else(|| ValueError::Unsupported(format!("non-finite number {}", self)))
    }
}

impl IntoValue for f32 {
    fn into_value(self, source: &Source) -> Result<Value, ValueError> {
        f64::from(self).into_value(source)
    }
}

impl IntoValue for Decimal {
    fn into_value(self, source: &Source) -> Result<Value, ValueError> {
        Ok(Value::Number(Number::from_decimal(self, source.clone())))
    }
}

impl IntoValue for String {
    fn into_value(self, source: &Source) -> Result<Value, ValueError> {
        Ok(Value::string(self, source.clone()))
    }
}

impl IntoValue for &str {
    fn into_value(self, source: &Source) -> Result<Value, ValueError> {
        Ok(Value::string(self, source.clone()))
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self, source: &Source) -> Result<Value, ValueError> {
        match self {
            Some(inner) => inner.into_value(source),
            None => Ok(Value::null(source.clone())),
        }
    }
}

impl<T: IntoValue> IntoValue for Box<T> {
    fn into_value(self, source: &Source) -> Result<Value, ValueError> {
        (*self).into_value(source)
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self, source: &Source) -> Result<Value, ValueError> {
        let elements = self
            .into_iter()
            .map(|item| item.into_value(source))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::array(elements, source.clone()))
    }
}

impl<T: IntoValue + Clone> IntoValue for &[T] {
    fn into_value(self, source: &Source) -> Result<Value, ValueError> {
        self.to_vec().into_value(source)
    }
}

impl<T: IntoValue> IntoValue for BTreeMap<String, T> {
    fn into_value(self, source: &Source) -> Result<Value, ValueError> {
        let entries = self
            .into_iter()
            .map(|(k, v)| Ok((k, v.into_value(source)?)))
            .collect::<Result<BTreeMap<_, _>, ValueError>>()?;
        Ok(Value::map(entries, source.clone()))
    }
}

impl<T: IntoValue, S: std::hash::BuildHasher> IntoValue for HashMap<String, T, S> {
    fn into_value(self, source: &Source) -> Result<Value, ValueError> {
        self.into_iter().collect::<BTreeMap<_, _>>().into_value(source)
    }
}
