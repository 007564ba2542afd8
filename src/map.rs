//! Ordered map type for document tables.
//!
//! This module provides [`Table`], a wrapper around [`IndexMap`] that maintains
//! insertion order. A document is simply the root `Table`; nested tables use
//! the same type, whether they were opened explicitly by a `[a.b]` header or
//! created implicitly as an ancestor of a deeper one.
//!
//! ## Why IndexMap?
//!
//! `IndexMap` instead of `HashMap` ensures:
//!
//! - **Deterministic rendering**: [`crate::to_string`] walks entries in the
//!   order they appeared in the source
//! - **Predictable iteration**: easier testing and debugging
//!
//! ## Examples
//!
//! ```rust
//! use minitoml::{Table, Value};
//!
//! let mut table = Table::new();
//! table.insert("name".to_string(), Value::from("Alice"));
//! table.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;

/// An ordered map of string keys to document values.
///
/// Keys are unique; the parser treats a second definition of the same key as
/// a duplicate-key error rather than overwriting.
///
/// # Examples
///
/// ```rust
/// use minitoml::{Table, Value};
///
/// let mut table = Table::new();
/// table.insert("first".to_string(), Value::from(1));
/// table.insert("second".to_string(), Value::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = table.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table(IndexMap<String, crate::Value>);

impl Table {
    /// Creates an empty `Table`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use minitoml::Table;
    ///
    /// let table = Table::new();
    /// assert!(table.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Table(IndexMap::new())
    }

    /// Creates an empty `Table` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the table.
    ///
    /// If the table already contained this key, the old value is returned.
    /// The parser never relies on overwriting; it checks
    /// [`Table::contains_key`] first and records a duplicate instead.
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use minitoml::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// table.insert("key".to_string(), Value::from(42));
    /// assert_eq!(table.get("key").and_then(|v| v.as_integer()), Some(42));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut crate::Value> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the table contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the table, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the table, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the table, in
    /// insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl IntoIterator for Table {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        Table(IndexMap::from_iter(iter))
    }
}
