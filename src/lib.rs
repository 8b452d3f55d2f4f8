//! Layered configuration with strict precedence, aliases and typed reads.
//!
//! Tiercfg answers one question: given several sources that may all define a
//! setting, which value wins? Sources are merged into a single queryable
//! view, keys are case-insensitive and may be dotted paths into nested
//! documents, and values are converted to the type the caller asks for on
//! read.
//!
//! ```
//! use tiercfg::{ConfigFormat, Engine};
//!
//! let mut config = Engine::new();
//! config.set_default("server.port", 8080);
//!
//! config.set_config_type(ConfigFormat::Yaml);
//! config.read_config("Server:\n  Host: example.com\n")?;
//!
//! assert_eq!(config.get_string("server.host")?, "example.com");
//! assert_eq!(config.get_int("SERVER.PORT")?, 8080);
//! assert!(config.get("server.tls").is_none());
//! # Ok::<(), tiercfg::ConfigError>(())
//! ```
//!
//! # Layer precedence
//!
//! ```text
//! Override          .set()                          highest
//! Flag              .set_flags()
//! Env               .bind_env() / .automatic_env()
//! Config file       .read_config() / .read_config_file()
//! Key/value store   .add_kv_store()
//! Default           .set_default()                  lowest
//! ```
//!
//! A read scans the layers top to bottom and returns the first value found.
//! Layers only grow: there is no way to clear an override, so once a key is
//! set at a higher layer the lower layers stay hidden for that key.
//!
//! Every layer is **sparse**. A config file does not need to be complete, an
//! env var can target one key, and a flag only counts when it was actually
//! given on the command line.
//!
//! # Keys
//!
//! Keys are split on a delimiter (`.` by default, see
//! [`EngineBuilder::key_delimiter`]) and lowercased, so `Clothing.Jacket`,
//! `clothing.jacket` and `CLOTHING.JACKET` are the same setting. Document
//! keys keep their casing but are matched the same way.
//!
//! # Aliases
//!
//! [`Engine::register_alias`] maps an alternate name onto a canonical key.
//! Aliases chain, and every read and write goes through them first, so all
//! names for a setting see the same value:
//!
//! ```
//! # use tiercfg::Engine;
//! let mut config = Engine::new();
//! config.register_alias("Foo", "Bar");
//! config.register_alias("Bar", "Title");
//! config.set("Foo", "Checking Case");
//! assert_eq!(config.get_string("title").unwrap(), "Checking Case");
//! ```
//!
//! A registration that would close a cycle (`Baz → Roo`, then `Roo → Baz`)
//! is refused with a warning, so every name for a setting keeps resolving to
//! the same key. Resolution itself also stops at the first repeated key.
//!
//! # Documents
//!
//! YAML, JSON, TOML, INI and properties documents are parsed into a
//! [`Tree`] and deep-merged into the config-file layer. Reading a second
//! document never discards the first: tables merge key by key and only
//! values at the same path are replaced. Parse failures are returned as
//! [`ConfigError::Unmarshal`] with the parser's own error as the source.
//!
//! # Environment variables
//!
//! With prefix `myapp`, [`bind_env("port", None)`](Engine::bind_env) reads
//! `MYAPP_PORT`; [`automatic_env(true)`](Engine::automatic_env) does the same
//! for every key. Nested keys need a replacer so that `database.url` maps to
//! `MYAPP_DATABASE_URL`:
//!
//! ```
//! # use std::collections::HashMap;
//! # use tiercfg::Engine;
//! let vars: HashMap<String, String> =
//!     [("MYAPP_DATABASE_URL".to_string(), "pg://env".to_string())].into();
//! let config = Engine::builder()
//!     .env_prefix("myapp")
//!     .automatic_env(true)
//!     .env_key_replacer(".", "_")
//!     .env_source(vars)
//!     .build();
//! assert_eq!(config.get_string("database.url").unwrap(), "pg://env");
//! ```
//!
//! # Typed reads
//!
//! `get_bool`, `get_int`, `get_float`, `get_string`, `get_duration`,
//! `get_seq`, `get_string_vec` and `get_table` accept both native values and
//! their common string spellings (`"true"`, `"1"`, `"1h30m"`). A missing key
//! is [`ConfigError::KeyNotFound`]; a value that cannot be converted is
//! [`ConfigError::TypeCoercion`]. Plain [`Engine::get`] never fails and
//! returns `None` for a missing key.
//!
//! # Sharing
//!
//! [`Engine`] is a plain value mutated through `&mut self`. For shared access
//! across threads wrap it in a [`SharedEngine`]; [`global()`] returns a
//! lazily created process-wide one for applications that want it.
//!
//! # Logging
//!
//! The crate emits [`tracing`] events (alias cycles at `warn`, layer hits and
//! document merges at `debug`) and leaves subscriber setup to the
//! application.

pub mod error;

mod alias;
mod builder;
#[cfg(feature = "clap")]
mod cli;
mod coerce;
mod engine;
mod env;
mod format;
mod key;
mod shared;
mod source;
mod tree;
mod value;

#[cfg(test)]
mod fixtures;

pub use alias::AliasTable;
pub use builder::EngineBuilder;
#[cfg(feature = "clap")]
pub use cli::ClapFlags;
pub use coerce::Coerce;
pub use engine::Engine;
pub use env::{EnvSource, ProcessEnv};
pub use error::{ConfigError, Result};
pub use format::{ConfigFormat, parse};
pub use key::KeyPath;
pub use shared::{SharedEngine, global};
pub use source::{FlagSource, KeyValueStore, LayerKind, SourceLayer};
pub use tree::Tree;
pub use value::Value;
