//! The resolver: aliases in front, six prioritized layers behind.
//!
//! Every read and write first sends the key through the [`AliasTable`], so
//! all names for a setting land on one canonical path. Reads then scan the
//! layers in [`LayerKind::PRIORITY`] order and return the first value found.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::alias::AliasTable;
use crate::builder::EngineBuilder;
use crate::coerce::Coerce;
use crate::env::{EnvLayer, EnvSource, ProcessEnv};
use crate::error::{ConfigError, Result};
use crate::format::{self, ConfigFormat};
use crate::key::{DEFAULT_DELIMITER, KeyPath};
use crate::source::{
    FileLayer, FlagLayer, FlagSource, FlatLayer, KeyValueStore, KvLayer, LayerKind, SourceLayer,
};
use crate::tree::Tree;
use crate::value::Value;

/// A layered configuration view.
///
/// Missing keys are never an error for [`get`](Self::get); only the typed
/// accessors report [`ConfigError::KeyNotFound`], and they keep it separate
/// from [`ConfigError::TypeCoercion`].
pub struct Engine {
    delimiter: String,
    aliases: AliasTable,
    overrides: FlatLayer,
    flags: FlagLayer,
    env: EnvLayer,
    file: FileLayer,
    kv: KvLayer,
    defaults: FlatLayer,
    config_type: Option<ConfigFormat>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine reading the process environment, with `.` as key delimiter.
    pub fn new() -> Self {
        Self::with_parts(DEFAULT_DELIMITER, Box::new(ProcessEnv))
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub(crate) fn with_parts(delimiter: &str, env_source: Box<dyn EnvSource>) -> Self {
        Self {
            delimiter: delimiter.to_string(),
            aliases: AliasTable::with_delimiter(delimiter),
            overrides: FlatLayer::new(LayerKind::Override),
            flags: FlagLayer::new(delimiter),
            env: EnvLayer::new(delimiter, env_source),
            file: FileLayer::default(),
            kv: KvLayer::new(delimiter),
            defaults: FlatLayer::new(LayerKind::Default),
            config_type: None,
        }
    }

    pub fn key_delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Canonical path for `key` after following aliases.
    pub fn canonical_key(&self, key: &str) -> KeyPath {
        self.aliases.resolve(key)
    }

    // --- writes -------------------------------------------------------------

    /// Set an override. Overrides beat every other layer and are never
    /// cleared.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let path = self.aliases.resolve(key);
        self.overrides.insert(path, value.into());
    }

    /// Set a default, the lowest-priority layer.
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) {
        let path = self.aliases.resolve(key);
        self.defaults.insert(path, value.into());
    }

    /// Returns `false` when the alias was refused because it would point at
    /// itself or close a cycle.
    pub fn register_alias(&mut self, alias: &str, target: &str) -> bool {
        self.aliases.register(alias, target)
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    // --- environment ------------------------------------------------------------

    pub fn set_env_prefix(&mut self, prefix: &str) {
        self.env.set_prefix(prefix);
    }

    pub fn env_prefix(&self) -> Option<&str> {
        self.env.prefix()
    }

    /// Check the environment for every key on read.
    pub fn automatic_env(&mut self, on: bool) {
        self.env.set_automatic(on);
    }

    pub fn set_env_key_replacer(&mut self, from: &str, to: &str) {
        self.env.add_replacement(from, to);
    }

    pub fn set_env_source(&mut self, source: impl EnvSource + 'static) {
        self.env.set_source(Box::new(source));
    }

    /// Bind `key` to an env var: `name` if given, otherwise the prefixed
    /// upper-case key (`APP_PORT` for `port` with prefix `app`).
    pub fn bind_env(&mut self, key: &str, name: Option<&str>) {
        let path = self.aliases.resolve(key);
        let var = self.env.bind(path, name);
        tracing::debug!(key, var = %var, "bound env var");
    }

    // --- flags and key/value stores ----------------------------------------------

    pub fn set_flags(&mut self, flags: impl FlagSource + 'static) {
        self.flags.set_source(Box::new(flags));
    }

    /// Read `key` from the flag called `flag` instead of the joined key name.
    pub fn bind_flag(&mut self, key: &str, flag: &str) {
        let path = self.aliases.resolve(key);
        self.flags.bind(path, flag);
    }

    pub fn add_kv_store(&mut self, store: impl KeyValueStore + 'static) {
        self.kv.add(Box::new(store));
    }

    // --- documents -------------------------------------------------------------

    pub fn set_config_type(&mut self, format: ConfigFormat) {
        self.config_type = Some(format);
    }

    /// Set the config type from a name such as `"yaml"` or `"yml"`. An
    /// unknown name leaves the current type untouched.
    pub fn set_config_type_name(&mut self, name: &str) -> Result<()> {
        self.config_type = Some(name.parse()?);
        Ok(())
    }

    pub fn config_type(&self) -> Option<ConfigFormat> {
        self.config_type
    }

    /// Parse `content` with the current config type and merge it into the
    /// config-file layer. Keys from earlier documents survive unless the new
    /// document sets the same path.
    pub fn read_config(&mut self, content: &str) -> Result<()> {
        let format = self.config_type.ok_or(ConfigError::NoConfigType)?;
        let tree = format::parse(content, format)?;
        tracing::debug!(format = %format, keys = tree.len(), "merging document");
        self.merge_tree(tree);
        Ok(())
    }

    /// Read and merge a file. The declared config type wins; otherwise the
    /// format comes from the file extension.
    pub fn read_config_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = match self.config_type {
            Some(f) => f,
            None => ConfigFormat::from_path(path)?,
        };
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let tree = format::parse(&content, format)?;
        tracing::debug!(path = %path.display(), format = %format, keys = tree.len(), "merging file");
        self.merge_tree(tree);
        Ok(())
    }

    /// Merge an already-parsed document into the config-file layer.
    pub fn merge_tree(&mut self, tree: Tree) {
        self.file.merge(tree);
    }

    /// Whether `key` is present in the config-file layer.
    pub fn in_config(&self, key: &str) -> bool {
        let path = self.aliases.resolve(key);
        self.file.tree().contains(&path)
    }

    // --- reads -------------------------------------------------------------------

    /// The winning value for `key`, or `None` if no layer has it.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.find(key).map(|(_, value)| value)
    }

    /// Like [`get`](Self::get), also naming the layer that answered.
    pub fn find(&self, key: &str) -> Option<(LayerKind, Value)> {
        let path = self.aliases.resolve(key);
        self.find_path(&path)
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// A null in one layer does not hide a value in a lower one.
    fn find_path(&self, path: &KeyPath) -> Option<(LayerKind, Value)> {
        self.layers().into_iter().find_map(|layer| {
            let value = layer.lookup(path).filter(|v| *v != Value::Null)?;
            tracing::debug!(key = %path, layer = %layer.kind(), "resolved");
            Some((layer.kind(), value))
        })
    }

    fn layers(&self) -> [&dyn SourceLayer; 6] {
        [
            &self.overrides,
            &self.flags,
            &self.env,
            &self.file,
            &self.kv,
            &self.defaults,
        ]
    }

    /// Read `key` and convert it to `T`.
    pub fn get_as<T: Coerce>(&self, key: &str) -> Result<T> {
        let value = self
            .get(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;
        T::coerce(&value).ok_or_else(|| ConfigError::TypeCoercion {
            key: key.to_string(),
            expected: T::EXPECTED,
            found: value.describe(),
        })
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get_as(key)
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.get_as(key)
    }

    pub fn get_float(&self, key: &str) -> Result<f64> {
        self.get_as(key)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get_as(key)
    }

    pub fn get_duration(&self, key: &str) -> Result<Duration> {
        self.get_as(key)
    }

    pub fn get_seq(&self, key: &str) -> Result<Vec<Value>> {
        self.get_as(key)
    }

    pub fn get_string_vec(&self, key: &str) -> Result<Vec<String>> {
        self.get_as(key)
    }

    pub fn get_table(&self, key: &str) -> Result<Tree> {
        self.get_as(key)
    }

    // --- whole-config views --------------------------------------------------------

    /// Every canonical key known to a local layer, sorted.
    ///
    /// Key/value stores are not enumerated.
    pub fn all_keys(&self) -> Vec<String> {
        self.all_paths()
            .iter()
            .map(|p| p.join(&self.delimiter))
            .collect()
    }

    fn all_paths(&self) -> BTreeSet<KeyPath> {
        self.layers()
            .into_iter()
            .flat_map(|layer| layer.keys())
            .collect()
    }

    /// The resolved value of every key in [`all_keys`](Self::all_keys),
    /// folded into one tree.
    ///
    /// A path under a key that resolves to a scalar is left out, so the tree
    /// never disagrees with [`get`](Self::get) on that key.
    pub fn all_settings(&self) -> Tree {
        let mut tree = Tree::new();
        for path in self.all_paths() {
            if self.shadowed_by_scalar(&path) {
                continue;
            }
            if let Some((_, value)) = self.find_path(&path) {
                tree.set(&path, value);
            }
        }
        tree
    }

    fn shadowed_by_scalar(&self, path: &KeyPath) -> bool {
        let segments = path.segments();
        (1..segments.len()).any(|split| {
            let prefix = KeyPath::from_segments(&segments[..split]);
            matches!(self.find_path(&prefix), Some((_, value)) if !value.is_table())
        })
    }

    /// Deserialize [`all_settings`](Self::all_settings) into `T`.
    pub fn unmarshal<T: DeserializeOwned>(&self) -> Result<T> {
        let json = serde_json::to_value(self.all_settings())
            .map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        serde_json::from_value(json).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use serde::Deserialize;
    use tempfile::TempDir;

    use super::*;
    use crate::fixtures::test::{JSON_EXAMPLE, TOML_EXAMPLE, YAML_EXAMPLE, env};

    fn engine() -> Engine {
        Engine::builder().env_source(env(&[])).build()
    }

    fn read(engine: &mut Engine, format: ConfigFormat, content: &str) {
        engine.set_config_type(format);
        engine.read_config(content).unwrap();
    }

    fn with_all_formats() -> Engine {
        let mut e = engine();
        read(&mut e, ConfigFormat::Yaml, YAML_EXAMPLE);
        read(&mut e, ConfigFormat::Json, JSON_EXAMPLE);
        read(&mut e, ConfigFormat::Toml, TOML_EXAMPLE);
        e
    }

    #[test]
    fn default_is_returned() {
        let mut e = engine();
        e.set_default("age", 45);
        assert_eq!(e.get("age"), Some(Value::Integer(45)));

        e.set_default("clothing.jacket", "slacks");
        assert_eq!(e.get("clothing.jacket"), Some(Value::from("slacks")));
    }

    #[test]
    fn override_is_returned() {
        let mut e = engine();
        e.set("age", 40);
        assert_eq!(e.get("age"), Some(Value::Integer(40)));
    }

    #[test]
    fn missing_key_is_none_until_defaulted() {
        let mut e = engine();
        assert_eq!(e.get("state"), None);
        assert!(!e.is_set("state"));
        e.set_default("state", "NYC");
        assert_eq!(e.get("state"), Some(Value::from("NYC")));
        assert!(e.is_set("state"));
    }

    #[test]
    fn override_beats_default_both_orders() {
        let mut e = engine();
        e.set_default("port", 80);
        e.set("port", 8080);
        assert_eq!(e.get_int("port").unwrap(), 8080);

        let mut e = engine();
        e.set("port", 8080);
        e.set_default("port", 80);
        assert_eq!(e.get_int("port").unwrap(), 8080);
    }

    #[test]
    fn override_can_be_replaced() {
        let mut e = engine();
        e.set("name", "a");
        e.set("NAME", "b");
        assert_eq!(e.get_string("name").unwrap(), "b");
    }

    #[test]
    fn alias_write_is_visible_under_target() {
        let mut e = engine();
        e.register_alias("years", "age");
        e.set("years", 45);
        assert_eq!(e.get("age"), Some(Value::Integer(45)));
        assert_eq!(e.get("years"), Some(Value::Integer(45)));
    }

    #[test]
    fn aliases_of_aliases() {
        let mut e = engine();
        e.register_alias("Foo", "Bar");
        e.register_alias("Bar", "Title");
        e.set("Foo", "Checking Case");
        assert_eq!(e.get_string("Bar").unwrap(), "Checking Case");
        assert_eq!(e.get_string("Title").unwrap(), "Checking Case");
    }

    #[test]
    fn recursive_aliases_terminate() {
        let mut e = engine();
        assert!(e.register_alias("Baz", "Roo"));
        assert!(!e.register_alias("Roo", "baz"));
        e.set("Baz", "cycled");
        assert_eq!(e.get_string("baz").unwrap(), "cycled");
        assert_eq!(e.get("Roo"), e.get("Baz"));
        assert_eq!(e.get_string("roo").unwrap(), "cycled");
    }

    #[test]
    fn alias_reads_file_values() {
        let mut e = with_all_formats();
        e.register_alias("jacket", "clothing.jacket");
        assert_eq!(e.get_string("Jacket").unwrap(), "leather");
    }

    #[test]
    fn case_insensitive_keys() {
        let mut e = engine();
        e.set("Title", "Checking Case");
        assert_eq!(e.get_string("tItle").unwrap(), "Checking Case");
        assert_eq!(e.get_string("TITLE").unwrap(), "Checking Case");
    }

    #[test]
    fn yaml_document() {
        let mut e = engine();
        read(&mut e, ConfigFormat::Yaml, YAML_EXAMPLE);
        assert_eq!(e.get_string("name").unwrap(), "steve");
    }

    #[test]
    fn json_document() {
        let mut e = engine();
        read(&mut e, ConfigFormat::Json, JSON_EXAMPLE);
        assert_eq!(e.get_string("id").unwrap(), "0001");
    }

    #[test]
    fn toml_document() {
        let mut e = engine();
        read(&mut e, ConfigFormat::Toml, TOML_EXAMPLE);
        assert_eq!(e.get_string("title").unwrap(), "TOML Example");
    }

    #[test]
    fn documents_merge_across_formats() {
        let e = with_all_formats();
        assert_eq!(e.get_string("id").unwrap(), "0001");
        assert_eq!(e.get_string("title").unwrap(), "TOML Example");
        assert_eq!(e.get_string("eyes").unwrap(), "brown");
        assert!(e.get_string("owner.bio").unwrap().starts_with("MongoDB Chief"));
        // JSON came after YAML and also defines `name`.
        assert_eq!(e.get_string("name").unwrap(), "Cake");
    }

    #[test]
    fn later_documents_leave_other_keys_alone() {
        let mut e = engine();
        read(&mut e, ConfigFormat::Yaml, "name: steve\n");
        read(&mut e, ConfigFormat::Json, r#"{"id": "0001"}"#);
        read(&mut e, ConfigFormat::Toml, "title = \"TOML Example\"\n");
        assert_eq!(e.get_string("name").unwrap(), "steve");
        assert_eq!(e.get_string("id").unwrap(), "0001");
        assert_eq!(e.get_string("title").unwrap(), "TOML Example");
    }

    #[test]
    fn file_value_shadows_default() {
        let mut e = with_all_formats();
        e.set_default("clothing.jacket", "slacks");
        assert_eq!(e.get_string("clothing.jacket").unwrap(), "leather");
        assert_eq!(e.find("clothing.jacket").unwrap().0, LayerKind::ConfigFile);
    }

    #[test]
    fn nested_table_read() {
        let e = with_all_formats();
        let pants = e.get_table("clothing.pants").unwrap();
        assert_eq!(pants.get_str("size"), Some(&Value::from("large")));
    }

    #[test]
    fn typed_reads_from_documents() {
        let e = with_all_formats();
        assert_eq!(e.get_int("age").unwrap(), 35);
        assert!(e.get_bool("beard").unwrap());
        assert!(e.get_bool("hacker").unwrap());
        assert_eq!(e.get_float("ppu").unwrap(), 0.55);
        assert_eq!(
            e.get_string_vec("hobbies").unwrap(),
            ["skateboarding", "snowboarding", "go"]
        );
        assert_eq!(e.get_seq("batters.batter").unwrap().len(), 4);
        assert_eq!(e.get_string("owner.dob").unwrap(), "1979-05-27T07:32:00Z");
    }

    #[test]
    fn missing_and_mismatched_are_distinct_errors() {
        let e = with_all_formats();
        assert!(matches!(e.get_int("nope"), Err(ConfigError::KeyNotFound(k)) if k == "nope"));
        let err = e.get_int("eyes").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TypeCoercion { expected: "integer", .. }
        ));
        assert!(err.to_string().contains("brown"));
    }

    #[test]
    fn full_precedence_chain() {
        let flags: HashMap<String, String> = [("k".to_string(), "flag".to_string())].into();
        let kv: HashMap<String, Value> = [("k".to_string(), Value::from("kv"))].into();
        let mut e = Engine::builder()
            .env_source(env(&[("K", "env")]))
            .config_type(ConfigFormat::Toml)
            .build();

        e.set_default("k", "default");
        assert_eq!(e.find("k").unwrap().0, LayerKind::Default);

        e.add_kv_store(kv);
        assert_eq!(e.find("k").unwrap(), (LayerKind::KeyValueStore, Value::from("kv")));

        e.read_config("k = \"file\"\n").unwrap();
        assert_eq!(e.find("k").unwrap(), (LayerKind::ConfigFile, Value::from("file")));

        e.bind_env("k", None);
        assert_eq!(e.find("k").unwrap(), (LayerKind::Env, Value::from("env")));

        e.set_flags(flags);
        assert_eq!(e.find("k").unwrap(), (LayerKind::Flag, Value::from("flag")));

        e.set("k", "override");
        assert_eq!(e.find("k").unwrap(), (LayerKind::Override, Value::from("override")));
    }

    #[test]
    fn env_strings_coerce() {
        let mut e = Engine::builder()
            .env_prefix("app")
            .automatic_env(true)
            .env_source(env(&[
                ("APP_PORT", "4000"),
                ("APP_DEBUG", "true"),
                ("APP_TIMEOUT", "1m30s"),
                ("APP_TAGS", "a b c"),
            ]))
            .build();
        e.set_default("port", 80);
        assert_eq!(e.get_int("port").unwrap(), 4000);
        assert!(e.get_bool("debug").unwrap());
        assert_eq!(e.get_duration("timeout").unwrap(), Duration::from_secs(90));
        assert_eq!(e.get_string_vec("tags").unwrap(), ["a", "b", "c"]);
    }

    #[test]
    fn bound_env_follows_alias() {
        let mut e = Engine::builder()
            .env_source(env(&[("SERVICE_PORT", "7000")]))
            .build();
        e.register_alias("listen", "port");
        e.bind_env("listen", Some("SERVICE_PORT"));
        assert_eq!(e.get_int("port").unwrap(), 7000);
    }

    #[test]
    fn bound_flag_name() {
        let flags: HashMap<String, String> = [("db-url".to_string(), "pg://flag".to_string())].into();
        let mut e = engine();
        e.set_flags(flags);
        e.bind_flag("database.url", "db-url");
        assert_eq!(e.get_string("database.url").unwrap(), "pg://flag");
    }

    #[test]
    fn null_in_file_falls_through() {
        let mut e = engine();
        e.set_default("name", "fallback");
        read(&mut e, ConfigFormat::Yaml, "name: ~\n");
        assert_eq!(e.get_string("name").unwrap(), "fallback");
    }

    #[test]
    fn override_table_answers_nested_keys() {
        let mut e = engine();
        let mut db = Tree::new();
        db.insert("url", Value::from("pg://override"));
        e.set("database", db);
        assert_eq!(e.get_string("database.url").unwrap(), "pg://override");
    }

    #[test]
    fn in_config_only_sees_file_layer() {
        let mut e = with_all_formats();
        e.set_default("state", "NYC");
        assert!(e.in_config("clothing.jacket"));
        assert!(e.in_config("OWNER.organization"));
        assert!(!e.in_config("state"));
    }

    #[test]
    fn read_config_requires_type() {
        let mut e = engine();
        assert!(matches!(
            e.read_config("a = 1"),
            Err(ConfigError::NoConfigType)
        ));
    }

    #[test]
    fn malformed_document_propagates_and_keeps_state() {
        let mut e = engine();
        read(&mut e, ConfigFormat::Yaml, YAML_EXAMPLE);
        e.set_config_type(ConfigFormat::Json);
        let err = e.read_config("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Unmarshal { format: "json", .. }));
        assert_eq!(e.get_string("name").unwrap(), "steve");
    }

    #[test]
    fn read_config_file_infers_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.yaml");
        fs::write(&path, "server:\n  port: 9090\n").unwrap();

        let mut e = engine();
        e.read_config_file(&path).unwrap();
        assert_eq!(e.get_int("server.port").unwrap(), 9090);
    }

    #[test]
    fn read_config_file_missing_is_io_error() {
        let dir = TempDir::new().unwrap();
        let mut e = engine();
        let err = e.read_config_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn all_keys_spans_layers() {
        let mut e = engine();
        read(&mut e, ConfigFormat::Toml, TOML_EXAMPLE);
        e.set_default("state", "NYC");
        e.set("Age", 40);
        e.bind_env("home", None);
        assert_eq!(
            e.all_keys(),
            [
                "age",
                "home",
                "owner.bio",
                "owner.dob",
                "owner.organization",
                "state",
                "title"
            ]
        );
    }

    #[test]
    fn all_settings_resolves_each_key() {
        let mut e = engine();
        read(&mut e, ConfigFormat::Toml, "[server]\nhost = \"file\"\nport = 80\n");
        e.set("server.port", 8080);
        e.set_default("server.tls", false);

        let settings = e.all_settings();
        let server = settings.get_str("server").unwrap().as_table().unwrap();
        assert_eq!(server.get_str("host"), Some(&Value::from("file")));
        assert_eq!(server.get_str("port"), Some(&Value::Integer(8080)));
        assert_eq!(server.get_str("tls"), Some(&Value::Bool(false)));
    }

    #[test]
    fn all_settings_agrees_with_get_when_scalar_hides_table() {
        let mut e = engine();
        read(&mut e, ConfigFormat::Toml, "name = \"app\"\n[a]\nb = 1\n");
        e.set("a", 5);

        let settings = e.all_settings();
        assert_eq!(e.get("a"), Some(Value::Integer(5)));
        assert_eq!(settings.get_str("a"), Some(&Value::Integer(5)));
        assert_eq!(settings.get_str("name"), Some(&Value::from("app")));
    }

    #[test]
    fn unmarshal_sees_the_overriding_scalar() {
        #[derive(Debug, Deserialize)]
        struct Flat {
            a: i64,
        }
        let mut e = engine();
        read(&mut e, ConfigFormat::Toml, "[a]\nb = 1\n");
        e.set("a", 5);
        assert_eq!(e.unmarshal::<Flat>().unwrap().a, 5);
    }

    #[test]
    fn config_type_by_name() {
        let mut e = engine();
        e.set_config_type_name("YML").unwrap();
        assert_eq!(e.config_type(), Some(ConfigFormat::Yaml));
        e.read_config("name: steve\n").unwrap();
        assert_eq!(e.get_string("name").unwrap(), "steve");

        let err = e.set_config_type_name("hcl").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ref s) if s == "hcl"));
        assert_eq!(e.config_type(), Some(ConfigFormat::Yaml));
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Server {
        host: String,
        port: u16,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct AppConfig {
        name: String,
        server: Server,
    }

    #[test]
    fn unmarshal_into_struct() {
        let mut e = engine();
        read(&mut e, ConfigFormat::Yaml, "Name: demo\nserver:\n  host: localhost\n");
        e.set_default("server.port", 8080);
        let config: AppConfig = e.unmarshal().unwrap();
        assert_eq!(
            config,
            AppConfig {
                name: "demo".into(),
                server: Server {
                    host: "localhost".into(),
                    port: 8080,
                },
            }
        );
    }

    #[test]
    fn unmarshal_reports_missing_fields() {
        let e = engine();
        let err = e.unmarshal::<AppConfig>().unwrap_err();
        assert!(matches!(err, ConfigError::Deserialize(_)));
    }

    #[test]
    fn engines_are_independent() {
        let mut a = engine();
        let b = engine();
        a.set("shared", 1);
        assert!(a.is_set("shared"));
        assert!(!b.is_set("shared"));
    }
}
