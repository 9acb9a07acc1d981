//! The string-keyed table at the root of every configuration document.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::value::ConfigValue;

// ── ConfigMap ─────────────────────────────────────────────────────────────────

/// A string-keyed table of [`ConfigValue`]s.
///
/// `ConfigMap` is both the root of a document and the payload of every
/// [`ConfigValue::Table`] node.  It is backed by a `BTreeMap`, so iteration
/// order is the lexicographic key order.  That makes dumps deterministic:
/// serializing the same document twice produces byte-identical files, which
/// keeps configuration diffs readable in version control.
///
/// # Examples
///
/// ```
/// use confit_core::{ConfigMap, ConfigValue};
///
/// let mut map = ConfigMap::new();
/// map.insert("name", "demo");
/// map.insert("port", 8080_i64);
///
/// assert_eq!(map.get("port"), Some(&ConfigValue::Integer(8080)));
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigMap(BTreeMap<String, ConfigValue>);

impl ConfigMap {
    /// Creates an empty table.
    pub fn new() -> Self {
        ConfigMap(BTreeMap::new())
    }

    /// Inserts a key/value pair, returning the previous value for the key
    /// if there was one.
    ///
    /// Both arguments go through `Into`, so plain literals work:
    /// `map.insert("retries", 3_i64)`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.0.remove(key)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries in this table (not counting nested tables).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over entries in lexicographic key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ConfigValue> {
        self.0.iter()
    }

    /// Iterates over keys in lexicographic order.
    pub fn keys(&self) -> btree_map::Keys<'_, String, ConfigValue> {
        self.0.keys()
    }
}

// ── Conversions and iteration ─────────────────────────────────────────────────

impl From<BTreeMap<String, ConfigValue>> for ConfigMap {
    fn from(entries: BTreeMap<String, ConfigValue>) -> Self {
        ConfigMap(entries)
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigMap {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        ConfigMap(iter.into_iter().collect())
    }
}

impl IntoIterator for ConfigMap {
    type Item = (String, ConfigValue);
    type IntoIter = btree_map::IntoIter<String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConfigMap {
    type Item = (&'a String, &'a ConfigValue);
    type IntoIter = btree_map::Iter<'a, String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
