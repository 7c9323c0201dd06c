use crate::convert::string_to_value;
use crate::ArborStr;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A single scalar stored in a [`Container`](crate::Container) attribute.
///
/// There is deliberately no `Nil` case: an attribute that is not set is
/// simply missing from its container.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(ArborStr),
}

/// Variant tag of a [`Value`], with a stable lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Double,
    Text,
}

impl ValueKind {
    pub const ALL: [ValueKind; 4] = [
        ValueKind::Bool,
        ValueKind::Int,
        ValueKind::Double,
        ValueKind::Text,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Double => "double",
            ValueKind::Text => "text",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ValueKind {
    type Err = ArborStr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueKind::ALL
            .iter()
            .find(|k| k.name() == s)
            .copied()
            .ok_or_else(|| ArborStr::from(s))
    }
}

// constructors
impl Value {
    pub fn str(text: impl Into<ArborStr>) -> Self {
        Value::Text(text.into())
    }

    /// Decodes `text` as a value of the given kind.
    ///
    /// Returns `None` when `text` is not a complete, valid literal of that
    /// kind.
    pub fn parse_as(kind: ValueKind, text: &str) -> Option<Value> {
        match kind {
            ValueKind::Bool => string_to_value::<bool>(text).map(Value::Bool),
            ValueKind::Int => string_to_value::<i64>(text).map(Value::Int),
            ValueKind::Double => string_to_value::<f64>(text).map(Value::Double),
            ValueKind::Text => Some(Value::Text(text.into())),
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Double(_) => ValueKind::Double,
            Value::Text(_) => ValueKind::Text,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to doubles; nothing else converts.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Canonical string form; see [`value_to_string`](crate::value_to_string).
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn to_astr(&self) -> ArborStr {
        match self {
            Value::Text(s) => s.clone(),
            _ => self.to_text().into(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            // f64's Display is the shortest string that parses back to the same bits
            Value::Double(d) => write!(f, "{}", d),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

macro_rules! int_into_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Value {
                    Value::Int(i64::from(i))
                }
            }
        )*
    };
}

int_into_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(f: f32) -> Value {
        Value::Double(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Double(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Text(s.into())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Value {
        Value::Text(s.as_str().into())
    }
}

impl From<ArborStr> for Value {
    fn from(s: ArborStr) -> Value {
        Value::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Int(-42).to_string(), "-42");
        assert_eq!(Value::Double(1.25).to_string(), "1.25");
        assert_eq!(Value::Double(-0.1).to_string(), "-0.1");
        assert_eq!(Value::str("a <b>").to_string(), "a <b>");
    }

    #[test]
    fn test_kind_names() {
        for kind in ValueKind::ALL {
            assert_eq!(kind.name().parse::<ValueKind>(), Ok(kind));
        }
        assert!("float".parse::<ValueKind>().is_err());
        assert!("Int".parse::<ValueKind>().is_err());
    }

    #[test]
    fn test_parse_as() {
        assert_eq!(Value::parse_as(ValueKind::Int, "-7"), Some(Value::Int(-7)));
        assert_eq!(Value::parse_as(ValueKind::Int, "7.5"), None);
        assert_eq!(
            Value::parse_as(ValueKind::Double, "7"),
            Some(Value::Double(7.0))
        );
        assert_eq!(
            Value::parse_as(ValueKind::Bool, "true"),
            Some(Value::Bool(true))
        );
        assert_eq!(Value::parse_as(ValueKind::Bool, "True"), None);
        assert_eq!(Value::parse_as(ValueKind::Text, ""), Some(Value::str("")));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(3).as_double(), Some(3.0));
        assert_eq!(Value::Double(3.0).as_int(), None);
        assert_eq!(Value::str("x").as_str(), Some("x"));
        assert_eq!(Value::Bool(true).as_str(), None);
        assert_eq!(Value::from(7u8), Value::Int(7));
        assert_eq!(Value::from(u32::MAX), Value::Int(u32::MAX as i64));
        assert_eq!(Value::from(0.5f32), Value::Double(0.5));
    }
}
