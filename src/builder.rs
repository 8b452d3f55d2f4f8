use crate::engine::Engine;
use crate::env::{EnvSource, ProcessEnv};
use crate::format::ConfigFormat;
use crate::key::DEFAULT_DELIMITER;

/// Builder for an [`Engine`].
///
/// Every setting here can also be changed on a built engine; the builder
/// exists so an engine can be fully configured in one expression:
///
/// ```
/// use tiercfg::{ConfigFormat, Engine};
///
/// let engine = Engine::builder()
///     .env_prefix("myapp")
///     .automatic_env(true)
///     .env_key_replacer(".", "_")
///     .config_type(ConfigFormat::Toml)
///     .build();
/// assert_eq!(engine.config_type(), Some(ConfigFormat::Toml));
/// ```
pub struct EngineBuilder {
    delimiter: String,
    env_prefix: Option<String>,
    automatic_env: bool,
    env_replacements: Vec<(String, String)>,
    env_source: Box<dyn EnvSource>,
    config_type: Option<ConfigFormat>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            env_prefix: None,
            automatic_env: false,
            env_replacements: Vec::new(),
            env_source: Box::new(ProcessEnv),
            config_type: None,
        }
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Separator between key segments (default `"."`).
    pub fn key_delimiter(mut self, delimiter: &str) -> Self {
        self.delimiter = delimiter.to_string();
        self
    }

    /// Prefix for automatic and bound env var names. Upper-cased on use.
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Consult the environment for every key, not just bound ones.
    pub fn automatic_env(mut self, on: bool) -> Self {
        self.automatic_env = on;
        self
    }

    /// Replace `from` with `to` in env var names before reading them.
    /// Replacements apply in the order they were added.
    pub fn env_key_replacer(mut self, from: &str, to: &str) -> Self {
        self.env_replacements.push((from.to_string(), to.to_string()));
        self
    }

    /// Read env vars from `source` instead of the process environment.
    pub fn env_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.env_source = Box::new(source);
        self
    }

    /// Format used by [`Engine::read_config`].
    pub fn config_type(mut self, format: ConfigFormat) -> Self {
        self.config_type = Some(format);
        self
    }

    pub fn build(self) -> Engine {
        let mut engine = Engine::with_parts(&self.delimiter, self.env_source);
        if let Some(prefix) = &self.env_prefix {
            engine.set_env_prefix(prefix);
        }
        engine.automatic_env(self.automatic_env);
        for (from, to) in &self.env_replacements {
            engine.set_env_key_replacer(from, to);
        }
        if let Some(format) = self.config_type {
            engine.set_config_type(format);
        }
        engine
    }
}
