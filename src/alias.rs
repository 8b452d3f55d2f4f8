//! Alias registry: maps alternate key names onto a canonical key.
//!
//! Aliases chain (`foo → bar → title` resolves `foo` to `title`). A
//! registration that would close a cycle is refused with a `tracing::warn!`,
//! so every name in a chain keeps converging on one canonical path.
//! Resolution still walks with a visited set and stops at the first repeated
//! path, warning the same way, should the table ever hold a cycle.

use std::collections::{HashMap, HashSet};

use crate::key::{DEFAULT_DELIMITER, KeyPath};

#[derive(Debug, Clone)]
pub struct AliasTable {
    delimiter: String,
    entries: HashMap<KeyPath, KeyPath>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::with_delimiter(DEFAULT_DELIMITER)
    }
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: &str) -> Self {
        Self {
            delimiter: delimiter.to_string(),
            entries: HashMap::new(),
        }
    }

    /// Map `alias` onto `target`, replacing any previous mapping for `alias`.
    ///
    /// The target does not need to exist in any layer. An alias pointing at
    /// itself, or at a key that already resolves back to it, is ignored and
    /// the existing mapping is kept. Returns whether the alias was recorded.
    pub fn register(&mut self, alias: &str, target: &str) -> bool {
        let alias = KeyPath::parse_with(alias, &self.delimiter);
        let target = KeyPath::parse_with(target, &self.delimiter);
        if alias == target {
            tracing::warn!(alias = %alias, "ignoring alias that points at itself");
            return false;
        }
        let canonical = self.resolve_path(target.clone());
        if canonical == alias {
            tracing::warn!(
                alias = %alias,
                target = %target,
                "alias cycle detected; ignoring registration"
            );
            return false;
        }
        self.entries.insert(alias, target);
        true
    }

    /// Normalize `key` and follow the alias chain to its canonical path.
    pub fn resolve(&self, key: &str) -> KeyPath {
        self.resolve_path(KeyPath::parse_with(key, &self.delimiter))
    }

    /// Follow the alias chain starting at an already-normalized path.
    pub fn resolve_path(&self, path: KeyPath) -> KeyPath {
        let mut current = path;
        let mut seen = HashSet::new();
        seen.insert(current.clone());

        while let Some(next) = self.entries.get(&current) {
            if !seen.insert(next.clone()) {
                tracing::warn!(
                    from = %current,
                    repeat = %next,
                    "alias cycle detected; stopping resolution"
                );
                return next.clone();
            }
            current = next.clone();
        }
        current
    }

    pub fn is_alias(&self, key: &str) -> bool {
        self.entries
            .contains_key(&KeyPath::parse_with(key, &self.delimiter))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered `(alias, target)` pairs, sorted by alias.
    pub fn entries(&self) -> Vec<(&KeyPath, &KeyPath)> {
        let mut pairs: Vec<_> = self.entries.iter().collect();
        pairs.sort();
        pairs
    }
}
