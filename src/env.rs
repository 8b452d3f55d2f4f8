//! Environment variable layer.
//!
//! A key reaches the environment in two ways:
//!
//! - **Automatic**: with [`automatic`](EnvLayer::set_automatic) on, every
//!   lookup tries `UPPER(prefix + "_" + key)`.
//! - **Bound**: [`bind`](EnvLayer::bind) maps one key to a variable, either
//!   a name given by the caller or the same prefixed upper-case form.
//!
//! Replacer pairs (e.g. `.` → `_`) are applied to the variable name just
//! before it is read, so `database.url` can live in `APP_DATABASE_URL`.
//! Empty values count as unset.

use std::collections::HashMap;

use crate::key::KeyPath;
use crate::source::{LayerKind, SourceLayer};
use crate::value::Value;

/// Where variable values come from. The process environment in production,
/// a plain map in tests.
pub trait EnvSource: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

pub struct EnvLayer {
    delimiter: String,
    prefix: Option<String>,
    automatic: bool,
    replacer: Vec<(String, String)>,
    bindings: HashMap<KeyPath, String>,
    source: Box<dyn EnvSource>,
}

impl EnvLayer {
    pub fn new(delimiter: &str, source: Box<dyn EnvSource>) -> Self {
        Self {
            delimiter: delimiter.to_string(),
            prefix: None,
            automatic: false,
            replacer: Vec::new(),
            bindings: HashMap::new(),
            source,
        }
    }

    /// Set the prefix, upper-cased. A trailing `_` is stripped so `"APP"` and
    /// `"APP_"` behave the same.
    pub fn set_prefix(&mut self, prefix: &str) {
        let trimmed = prefix.trim_end_matches('_');
        self.prefix = (!trimmed.is_empty()).then(|| trimmed.to_uppercase());
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn set_automatic(&mut self, on: bool) {
        self.automatic = on;
    }

    pub fn add_replacement(&mut self, from: &str, to: &str) {
        if !from.is_empty() {
            self.replacer.push((from.to_string(), to.to_string()));
        }
    }

    pub fn set_source(&mut self, source: Box<dyn EnvSource>) {
        self.source = source;
    }

    /// Bind `path` to `name`, or to the prefixed upper-case key when `name`
    /// is `None`. Returns the variable name that was bound.
    pub fn bind(&mut self, path: KeyPath, name: Option<&str>) -> String {
        let var = match name {
            Some(n) => n.to_string(),
            None => self.prefixed(&path.join(&self.delimiter)),
        };
        self.bindings.insert(path, var.clone());
        var
    }

    /// `UPPER(prefix + "_" + key)`, or `UPPER(key)` without a prefix.
    pub fn prefixed(&self, key: &str) -> String {
        match &self.prefix {
            Some(p) => format!("{p}_{key}").to_uppercase(),
            None => key.to_uppercase(),
        }
    }

    fn read(&self, name: &str) -> Option<String> {
        let name = self
            .replacer
            .iter()
            .fold(name.to_string(), |acc, (from, to)| acc.replace(from, to));
        self.source.var(&name).filter(|v| !v.is_empty())
    }
}

impl SourceLayer for EnvLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Env
    }

    fn lookup(&self, path: &KeyPath) -> Option<Value> {
        if self.automatic {
            let name = self.prefixed(&path.join(&self.delimiter));
            if let Some(v) = self.read(&name) {
                return Some(Value::String(v));
            }
        }
        let bound = self.bindings.get(path)?;
        self.read(bound).map(Value::String)
    }

    fn keys(&self) -> Vec<KeyPath> {
        self.bindings.keys().cloned().collect()
    }
}
