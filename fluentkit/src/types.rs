//! Runtime value types shared across the crate.
//!
//! [`Value`] is what callers pass as formatting arguments; integers and
//! floats are kept apart so integer arguments never grow a decimal point.

use std::collections::HashMap;
use std::fmt::Display;

/// A runtime argument for message formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Emitted verbatim.
    String(String),
    /// Rendered through the locale integer formatter.
    Integer(i64),
    /// Rendered through the locale decimal formatter.
    Float(f64),
}

/// The argument map accepted by the formatting entrypoints, keyed by
/// variable name (without the `$`).
pub type Arguments = HashMap<String, Value>;

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value.into())
    }
}

/// Standard CLDR plural categories.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// The lowercase CLDR keyword, as used for select-expression variant
    /// keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from("hi"), Value::String("hi".to_string()));
        assert_eq!(Value::from(10), Value::Integer(10));
        assert_eq!(Value::from(10i64), Value::Integer(10));
        assert_eq!(Value::from(2.5), Value::Float(2.5));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(Value::from(10).to_string(), "10");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_plural_category_keywords() {
        assert_eq!(PluralCategory::One.as_str(), "one");
        assert_eq!(PluralCategory::Other.to_string(), "other");
    }
}
