use std::path::PathBuf;

use thiserror::Error;

/// Boxed parser error carried unchanged inside [`ConfigError::Unmarshal`].
pub type ParserError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Cannot read '{key}' as {expected}: found {found}")]
    TypeCoercion {
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error("Failed to parse {format} document: {source}")]
    Unmarshal {
        format: &'static str,
        source: ParserError,
    },

    #[error("Unsupported config type '{0}' (expected yaml, json, toml, ini or properties)")]
    UnsupportedFormat(String),

    #[error("No config type set; call .set_config_type() before reading a document")]
    NoConfigType,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to deserialize settings: {0}")]
    Deserialize(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Line-oriented parse failure for the INI and properties readers.
#[derive(Debug, Error)]
#[error("line {line}: {reason}")]
pub struct LineError {
    pub line: usize,
    pub reason: String,
}

/// A document whose top level is a scalar or sequence instead of a mapping.
#[derive(Debug, Error)]
#[error("expected a mapping at the top level, found {0}")]
pub struct NotATable(pub &'static str);
