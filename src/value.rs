//! Dynamic value representation for document trees.
//!
//! This module provides the [`Value`] enum, the tagged union stored at every
//! key of a parsed document. A document is a [`Table`] whose entries are
//! `Value`s; nested tables are `Value::Table`, so the whole tree is a strict
//! ownership forest rooted at the document.
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use minitoml::Value;
//!
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! // Or via the toml! macro
//! use minitoml::toml;
//! let array = toml!([1, 2, 3]);
//! ```
//!
//! ### Type Checking and Extraction
//!
//! ```rust
//! use minitoml::Value;
//!
//! let value = Value::from(42);
//! assert!(value.is_integer());
//! assert_eq!(value.as_integer(), Some(42));
//! assert_eq!(value.as_str(), None);
//!
//! // Safe extraction with TryFrom
//! let n: i64 = i64::try_from(value).unwrap();
//! assert_eq!(n, 42);
//! ```

use crate::Table;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Datetime rendering used everywhere: the exact source form the lexer
/// accepts, UTC with no offset.
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A dynamically-typed representation of any value a document can hold.
///
/// Integers are 64-bit signed but non-negative by construction: the lexer has
/// no rule for a leading minus, so a negative literal never reaches the tree.
/// Array elements are not required to share a type, but mixed arrays are
/// undefined behavior of the format rather than a supported feature.
///
/// # Examples
///
/// ```rust
/// use minitoml::Value;
///
/// let num = Value::Integer(42);
/// let text = Value::String("hello".to_string());
///
/// assert!(num.is_integer());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    String(String),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Array(Vec<Value>),
    Table(Table),
}

impl Value {
    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// Returns `true` if the value is a datetime.
    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(self, Value::DateTime(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is a table.
    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use minitoml::Value;
    ///
    /// assert_eq!(Value::Integer(42).as_integer(), Some(42));
    /// assert_eq!(Value::from("42").as_integer(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns
    /// `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use minitoml::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a datetime, returns a reference to it. Otherwise
    /// returns `None`.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is a table, returns a reference to it. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Renders the value in source form.
    ///
    /// For every non-table value this is re-parseable text: integers as
    /// digits, strings quoted with `"` escaped to `\"`, datetimes in the
    /// `%Y-%m-%dT%H:%M:%SZ` form, arrays bracketed and comma-separated.
    /// Tables render as a placeholder; rendering a table needs a header line,
    /// which is [`crate::to_string`]'s job.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
            Value::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Value::Table(_) => write!(f, "{{table}}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::String(s) => serializer.serialize_str(s),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::DateTime(dt) => {
                serializer.serialize_str(&dt.format(DATETIME_FORMAT).to_string())
            }
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Table(table) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(table.len()))?;
                for (k, v) in table.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer, string, boolean, array, or table")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value <= i64::MAX as u64 {
                    Ok(Value::Integer(value as i64))
                } else {
                    Err(E::custom(format!("integer {} does not fit in i64", value)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                // No float variant in the data model.
                Err(E::custom(format!("floats are not supported: {}", value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut table = Table::new();
                while let Some((key, value)) = map.next_entry()? {
                    table.insert(key, value);
                }
                Ok(Value::Table(table))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

// TryFrom implementations for extracting values from Value
impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Integer(i) => Ok(i),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Boolean(b) => Ok(b),
            _ => Err(crate::Error::custom(format!("expected bool, found {:?}", value))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {:?}",
                value
            ))),
        }
    }
}

// From implementations for creating Value from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn tryfrom_extraction() {
        let result: i64 = i64::try_from(Value::Integer(42)).unwrap();
        assert_eq!(result, 42);
        assert!(i64::try_from(Value::from("42")).is_err());

        let result: bool = bool::try_from(Value::Boolean(true)).unwrap();
        assert!(result);
        assert!(bool::try_from(Value::Integer(1)).is_err());

        let result: String = String::try_from(Value::from("hello")).unwrap();
        assert_eq!(result, "hello");
    }

    #[test]
    fn from_primitives() {
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(42i64), Value::Integer(42));
        assert_eq!(Value::from(42u32), Value::Integer(42));
        assert_eq!(Value::from("test"), Value::String("test".to_string()));
        assert_eq!(
            Value::from(vec![Value::Integer(1)]),
            Value::Array(vec![Value::Integer(1)])
        );
    }

    #[test]
    fn display_is_source_form() {
        assert_eq!(Value::Integer(123).to_string(), "123");
        assert_eq!(Value::Boolean(false).to_string(), "false");
        assert_eq!(Value::from("say \"hi\"").to_string(), r#""say \"hi\"""#);
        assert_eq!(
            Value::Array(vec![Value::Integer(1), Value::Integer(2)]).to_string(),
            "[1, 2]"
        );
        assert_eq!(Value::Array(vec![]).to_string(), "[]");

        let dt = Utc.with_ymd_and_hms(1979, 5, 27, 7, 32, 0).unwrap();
        assert_eq!(Value::DateTime(dt).to_string(), "1979-05-27T07:32:00Z");
    }

    #[test]
    fn type_predicates() {
        let value = Value::Integer(1);
        assert!(value.is_integer());
        assert!(!value.is_table());
        assert_eq!(value.as_integer(), Some(1));
        assert_eq!(value.as_str(), None);

        let table = Value::Table(Table::new());
        assert!(table.is_table());
        assert!(table.as_table().unwrap().is_empty());
    }
}
