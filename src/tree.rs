//! Nested, case-insensitive settings tree.
//!
//! Every parsed document becomes a [`Tree`]. Mapping keys keep the casing the
//! document used, but all lookups compare keys in folded form, and writes
//! reuse an existing key that differs only in case instead of adding a twin.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::key::{KeyPath, fold};
use crate::value::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    entries: BTreeMap<String, Value>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Insert a single top-level entry, replacing a case-insensitive match.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let slot = self.matching_key(&fold(&key)).unwrap_or(key);
        self.entries.insert(slot, value);
    }

    /// Look up a single top-level key, ignoring case.
    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.entry(&fold(key))
    }

    /// Walk `path` one segment at a time. Returns `None` as soon as a segment
    /// is missing or an intermediate node is not a table.
    pub fn get(&self, path: &KeyPath) -> Option<&Value> {
        let (leaf, parents) = path.segments().split_last()?;
        let mut current = self;
        for segment in parents {
            current = current.entry(segment)?.as_table()?;
        }
        current.entry(leaf)
    }

    pub fn contains(&self, path: &KeyPath) -> bool {
        self.get(path).is_some()
    }

    /// Set `value` at `path`, creating intermediate tables as needed.
    ///
    /// A scalar sitting where an intermediate table is needed is replaced by
    /// a table. If both the existing leaf and `value` are tables they are
    /// deep-merged; otherwise `value` overwrites.
    pub fn set(&mut self, path: &KeyPath, value: Value) {
        let Some((first, rest)) = path.segments().split_first() else {
            return;
        };
        let nested = rest.iter().rev().fold(value, |inner, segment| {
            let mut table = Tree::new();
            table.entries.insert(segment.clone(), inner);
            Value::Table(table)
        });
        self.merge_value(first, nested);
    }

    /// Deep-merge `other` into `self`.
    ///
    /// Tables present on both sides merge key-by-key; any other value from
    /// `other` overwrites what was there.
    pub fn merge_from(&mut self, other: Tree) {
        for (key, value) in other.entries {
            self.merge_value(&key, value);
        }
    }

    /// Every path that ends in a non-table value, in sorted order.
    pub fn leaf_paths(&self) -> Vec<KeyPath> {
        let mut out = Vec::new();
        self.collect_leaves(&[], &mut out);
        out.sort();
        out
    }

    fn collect_leaves(&self, prefix: &[String], out: &mut Vec<KeyPath>) {
        for (key, value) in &self.entries {
            let mut path = prefix.to_vec();
            path.push(key.clone());
            match value {
                Value::Table(sub) if !sub.is_empty() => sub.collect_leaves(&path, out),
                _ => out.push(KeyPath::from_segments(path)),
            }
        }
    }

    fn merge_value(&mut self, key: &str, value: Value) {
        let slot = self
            .matching_key(&fold(key))
            .unwrap_or_else(|| key.to_string());
        if let Value::Table(incoming) = value {
            if let Some(Value::Table(existing)) = self.entries.get_mut(&slot) {
                existing.merge_from(incoming);
                return;
            }
            self.entries.insert(slot, Value::Table(incoming));
            return;
        }
        self.entries.insert(slot, value);
    }

    fn entry(&self, folded: &str) -> Option<&Value> {
        if let Some(v) = self.entries.get(folded) {
            return Some(v);
        }
        self.entries
            .iter()
            .find(|(k, _)| fold(k) == folded)
            .map(|(_, v)| v)
    }

    fn matching_key(&self, folded: &str) -> Option<String> {
        if self.entries.contains_key(folded) {
            return Some(folded.to_string());
        }
        self.entries.keys().find(|k| fold(k) == folded).cloned()
    }
}

impl From<toml::Table> for Tree {
    fn from(table: toml::Table) -> Self {
        let mut tree = Tree::new();
        for (k, v) in table {
            tree.insert(k, Value::from(v));
        }
        tree
    }
}

impl FromIterator<(String, Value)> for Tree {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut tree = Tree::new();
        for (k, v) in iter {
            tree.insert(k, v);
        }
        tree
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
