//! Source layers and the collaborator contracts behind them.
//!
//! Every layer answers one question: does this canonical key path have a
//! value here? Alias resolution has already happened by the time a layer is
//! asked. The engine owns one layer of each [`LayerKind`] and scans them in
//! [`LayerKind::PRIORITY`] order.

use std::collections::HashMap;
use std::fmt;

use crate::key::KeyPath;
use crate::tree::Tree;
use crate::value::Value;

/// Layer identities, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    Override,
    Flag,
    Env,
    ConfigFile,
    KeyValueStore,
    Default,
}

impl LayerKind {
    pub const PRIORITY: [LayerKind; 6] = [
        LayerKind::Override,
        LayerKind::Flag,
        LayerKind::Env,
        LayerKind::ConfigFile,
        LayerKind::KeyValueStore,
        LayerKind::Default,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayerKind::Override => "override",
            LayerKind::Flag => "flag",
            LayerKind::Env => "env",
            LayerKind::ConfigFile => "config-file",
            LayerKind::KeyValueStore => "key-value-store",
            LayerKind::Default => "default",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform lookup contract implemented by every layer.
pub trait SourceLayer {
    fn kind(&self) -> LayerKind;

    fn lookup(&self, path: &KeyPath) -> Option<Value>;

    /// Keys this layer knows about without being asked, for `all_keys`.
    fn keys(&self) -> Vec<KeyPath> {
        Vec::new()
    }
}

// --- flat layers (override, default) ----------------------------------------

/// Values set one key at a time through the API.
///
/// Lookups match the full path first. When a table was stored under a
/// prefix of the path (`set("db", {url = ..})`), the remainder is looked up
/// inside that table.
#[derive(Debug, Clone)]
pub struct FlatLayer {
    kind: LayerKind,
    values: HashMap<KeyPath, Value>,
}

impl FlatLayer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            values: HashMap::new(),
        }
    }

    pub fn insert(&mut self, path: KeyPath, value: Value) {
        self.values.insert(path, value);
    }
}

impl SourceLayer for FlatLayer {
    fn kind(&self) -> LayerKind {
        self.kind
    }

    fn lookup(&self, path: &KeyPath) -> Option<Value> {
        if let Some(v) = self.values.get(path) {
            return Some(v.clone());
        }
        let segments = path.segments();
        (1..segments.len()).rev().find_map(|split| {
            let prefix = KeyPath::from_segments(&segments[..split]);
            let rest = KeyPath::from_segments(&segments[split..]);
            self.values.get(&prefix)?.as_table()?.get(&rest).cloned()
        })
    }

    fn keys(&self) -> Vec<KeyPath> {
        self.values.keys().cloned().collect()
    }
}

// --- config-file layer -------------------------------------------------------

/// All ingested documents, deep-merged into one tree.
#[derive(Debug, Clone, Default)]
pub struct FileLayer {
    tree: Tree,
}

impl FileLayer {
    pub fn merge(&mut self, document: Tree) {
        self.tree.merge_from(document);
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }
}

impl SourceLayer for FileLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::ConfigFile
    }

    fn lookup(&self, path: &KeyPath) -> Option<Value> {
        self.tree.get(path).cloned()
    }

    fn keys(&self) -> Vec<KeyPath> {
        self.tree.leaf_paths()
    }
}

// --- flags -------------------------------------------------------------------

/// Command-line flag collaborator.
///
/// Returns the raw value only for flags explicitly given on the command line;
/// a flag left at its default reports `None`.
pub trait FlagSource: Send + Sync {
    fn lookup(&self, name: &str) -> Option<String>;
}

impl FlagSource for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

#[derive(Default)]
pub struct FlagLayer {
    delimiter: String,
    source: Option<Box<dyn FlagSource>>,
    bindings: HashMap<KeyPath, String>,
}

impl FlagLayer {
    pub fn new(delimiter: &str) -> Self {
        Self {
            delimiter: delimiter.to_string(),
            ..Self::default()
        }
    }

    pub fn set_source(&mut self, source: Box<dyn FlagSource>) {
        self.source = Some(source);
    }

    /// Read `path` from the flag called `name` instead of the joined key.
    pub fn bind(&mut self, path: KeyPath, name: &str) {
        self.bindings.insert(path, name.to_string());
    }
}

impl SourceLayer for FlagLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Flag
    }

    fn lookup(&self, path: &KeyPath) -> Option<Value> {
        let source = self.source.as_ref()?;
        let name = match self.bindings.get(path) {
            Some(bound) => bound.clone(),
            None => path.join(&self.delimiter),
        };
        source.lookup(&name).map(Value::String)
    }

    fn keys(&self) -> Vec<KeyPath> {
        self.bindings.keys().cloned().collect()
    }
}

// --- key/value stores --------------------------------------------------------

/// Remote key/value store collaborator. Transport, caching and timeouts are
/// the implementation's business; the engine only asks for a key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
}

impl KeyValueStore for HashMap<String, Value> {
    fn get(&self, key: &str) -> Option<Value> {
        HashMap::get(self, key).cloned()
    }
}

/// Stores are asked in the order they were added; the first answer wins.
#[derive(Default)]
pub struct KvLayer {
    delimiter: String,
    stores: Vec<Box<dyn KeyValueStore>>,
}

impl KvLayer {
    pub fn new(delimiter: &str) -> Self {
        Self {
            delimiter: delimiter.to_string(),
            stores: Vec::new(),
        }
    }

    pub fn add(&mut self, store: Box<dyn KeyValueStore>) {
        self.stores.push(store);
    }
}

impl SourceLayer for KvLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::KeyValueStore
    }

    fn lookup(&self, path: &KeyPath) -> Option<Value> {
        let key = path.join(&self.delimiter);
        self.stores.iter().find_map(|store| store.get(&key))
    }
}
