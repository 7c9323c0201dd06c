//! Conversions between host types, [`Value`]s and their canonical strings.
//!
//! Encoding goes through [`ToValue`]: a host type either maps to exactly one
//! [`Value`] or it is not representable as a scalar at all. Decoding goes
//! through [`FromText`] (from a raw string) and [`FromValue`] (from an
//! already typed value). None of these ever fail loudly: an unsupported
//! type encodes to an empty string and a malformed string decodes to `None`.

use crate::{ArborStr, Value};

/// Trait for converting host types into a [`Value`].
///
/// Types that have no scalar representation (sequences, absent options)
/// return `None`.
pub trait ToValue {
    fn to_value(&self) -> Option<Value>;
}

impl ToValue for Value {
    fn to_value(&self) -> Option<Value> {
        Some(self.clone())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Bool(*self))
    }
}

macro_rules! int_to_value {
    ($($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Option<Value> {
                    Some(Value::Int(i64::from(*self)))
                }
            }
        )*
    };
}

int_to_value!(i8, i16, i32, i64, u8, u16, u32);

// wider than i64: only representable when the value fits
macro_rules! wide_int_to_value {
    ($($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Option<Value> {
                    i64::try_from(*self).ok().map(Value::Int)
                }
            }
        )*
    };
}

wide_int_to_value!(u64, usize, isize);

impl ToValue for f32 {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Double(*self as f64))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Double(*self))
    }
}

impl ToValue for str {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Text(self.into()))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Text(self.as_str().into()))
    }
}

impl ToValue for ArborStr {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Text(self.clone()))
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(|v| v.to_value())
    }
}

// Sequences are modelled as repeated child containers, never as values.
impl<T> ToValue for [T] {
    fn to_value(&self) -> Option<Value> {
        None
    }
}

impl<T> ToValue for Vec<T> {
    fn to_value(&self) -> Option<Value> {
        None
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Option<Value> {
        (**self).to_value()
    }
}

/// Canonical string form of `value`.
///
/// Booleans print as `true`/`false`, integers in plain base 10, doubles in
/// their shortest round-trip form and text unchanged. A type without a
/// scalar representation yields an empty string.
pub fn value_to_string<T: ToValue + ?Sized>(value: &T) -> String {
    match value.to_value() {
        Some(v) => v.to_text(),
        None => String::new(),
    }
}

/// Trait for parsing a complete string into a host type.
pub trait FromText: Sized {
    fn from_text(text: &str) -> Option<Self>;
}

impl FromText for bool {
    fn from_text(text: &str) -> Option<Self> {
        match text {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

macro_rules! int_from_text {
    ($($t:ty),*) => {
        $(
            impl FromText for $t {
                fn from_text(text: &str) -> Option<Self> {
                    // std accepts a leading '+', the canonical grammar does not
                    if text.starts_with('+') {
                        return None;
                    }
                    text.parse().ok()
                }
            }
        )*
    };
}

int_from_text!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! float_from_text {
    ($($t:ty),*) => {
        $(
            impl FromText for $t {
                fn from_text(text: &str) -> Option<Self> {
                    let digits = text.strip_prefix('-').unwrap_or(text);
                    match digits.chars().next() {
                        Some(c) if c.is_ascii_digit() || c == '.' => text.parse().ok(),
                        // the spellings Display produces for non-finite values
                        Some(_) if digits == "inf" || text == "NaN" => text.parse().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

float_from_text!(f32, f64);

impl FromText for String {
    fn from_text(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

impl FromText for ArborStr {
    fn from_text(text: &str) -> Option<Self> {
        Some(text.into())
    }
}

/// Parses the whole of `text` as a `T`.
///
/// Trailing garbage, an empty string (for non-text targets) or a literal of
/// the wrong type all yield `None`; nothing is ever defaulted to zero.
pub fn string_to_value<T: FromText>(text: &str) -> Option<T> {
    T::from_text(text)
}

/// Trait for reading a host type back out of a typed [`Value`].
///
/// Conversions are exact: an integer that does not fit the target yields
/// `None`. Text values are parsed with [`FromText`] so that documents whose
/// format carries no type information still load.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Text(s) => string_to_value(s),
            _ => None,
        }
    }
}

macro_rules! int_from_value {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(i) => <$t>::try_from(*i).ok(),
                        Value::Text(s) => string_to_value(s),
                        _ => None,
                    }
                }
            }
        )*
    };
}

int_from_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! float_from_value {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Double(d) => Some(*d as $t),
                        Value::Int(i) => Some(*i as $t),
                        Value::Text(s) => string_to_value(s),
                        Value::Bool(_) => None,
                    }
                }
            }
        )*
    };
}

float_from_value!(f32, f64);

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.to_text())
    }
}

impl FromValue for ArborStr {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.to_astr())
    }
}
