//! Normalized key paths.
//!
//! A key such as `"Clothing.Jacket"` is split on the delimiter and every
//! segment is lowercased, giving `["clothing", "jacket"]`. Two keys are the
//! same setting iff their paths are equal. Normalization never fails: the
//! empty string is the single-segment path `[""]`, and empty segments
//! (`"a..b"`) are kept rather than dropped.

use std::fmt;

pub const DEFAULT_DELIMITER: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Normalize `key` using the default `.` delimiter.
    pub fn parse(key: &str) -> Self {
        Self::parse_with(key, DEFAULT_DELIMITER)
    }

    /// Normalize `key`, splitting on `delimiter`.
    ///
    /// An empty delimiter never splits, so the whole key is one segment.
    pub fn parse_with(key: &str, delimiter: &str) -> Self {
        let segments = if delimiter.is_empty() {
            vec![fold(key)]
        } else {
            key.split(delimiter).map(fold).collect()
        };
        Self { segments }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<String> = segments.into_iter().map(|s| fold(s.as_ref())).collect();
        if segments.is_empty() {
            return Self {
                segments: vec![String::new()],
            };
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.len() == 1 && self.segments[0].is_empty()
    }

    /// Rejoin the segments. Casing of the original key is not recovered.
    pub fn join(&self, delimiter: &str) -> String {
        self.segments.join(delimiter)
    }

    /// A new path with `segment` appended.
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(fold(segment));
        Self { segments }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join(DEFAULT_DELIMITER))
    }
}

impl From<&str> for KeyPath {
    fn from(key: &str) -> Self {
        Self::parse(key)
    }
}

/// Case-fold a single segment or mapping key.
pub(crate) fn fold(s: &str) -> String {
    s.to_lowercase()
}
