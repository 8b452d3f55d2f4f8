//! Document formats and their parsers.
//!
//! Each parser turns raw text into a [`Tree`]. YAML, JSON and TOML go through
//! their serde crates; INI and Java-style properties are simple line readers
//! that produce string leaves. Parse failures surface as
//! [`ConfigError::Unmarshal`] carrying the parser's own error.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ConfigError, LineError, NotATable, Result};
use crate::key::KeyPath;
use crate::tree::Tree;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
    Ini,
    Properties,
}

impl ConfigFormat {
    pub const ALL: [ConfigFormat; 5] = [
        ConfigFormat::Yaml,
        ConfigFormat::Json,
        ConfigFormat::Toml,
        ConfigFormat::Ini,
        ConfigFormat::Properties,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Json => "json",
            ConfigFormat::Toml => "toml",
            ConfigFormat::Ini => "ini",
            ConfigFormat::Properties => "properties",
        }
    }

    /// Infer the format from a file extension (`config.yml` → `Yaml`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
        ext.parse()
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            "ini" => Ok(ConfigFormat::Ini),
            "properties" | "props" | "prop" => Ok(ConfigFormat::Properties),
            _ => Err(ConfigError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Parse `content` as `format` into a settings tree.
pub fn parse(content: &str, format: ConfigFormat) -> Result<Tree> {
    let unmarshal = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::Unmarshal {
        format: format.as_str(),
        source,
    };

    let value = match format {
        ConfigFormat::Yaml => {
            let doc: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| unmarshal(Box::new(e)))?;
            Value::from(doc)
        }
        ConfigFormat::Json => {
            let doc: serde_json::Value =
                serde_json::from_str(content).map_err(|e| unmarshal(Box::new(e)))?;
            Value::from(doc)
        }
        ConfigFormat::Toml => {
            let doc: toml::Table = toml::from_str(content).map_err(|e| unmarshal(Box::new(e)))?;
            return Ok(Tree::from(doc));
        }
        ConfigFormat::Ini => return parse_ini(content).map_err(|e| unmarshal(Box::new(e))),
        ConfigFormat::Properties => {
            return parse_properties(content).map_err(|e| unmarshal(Box::new(e)));
        }
    };

    match value {
        Value::Table(tree) => Ok(tree),
        // An empty YAML document parses to null.
        Value::Null => Ok(Tree::new()),
        other => Err(unmarshal(Box::new(NotATable(other.type_name())))),
    }
}

/// `[section]` headers open a table (dots in the name nest further); `key =
/// value` or `key: value` lines set string leaves; `;` and `#` start comments.
fn parse_ini(content: &str) -> std::result::Result<Tree, LineError> {
    let mut tree = Tree::new();
    let mut section: Vec<String> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        let line_no = idx + 1;
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest.strip_suffix(']').ok_or_else(|| LineError {
                line: line_no,
                reason: "unterminated section header".into(),
            })?;
            section = name.trim().split('.').map(|s| s.trim().to_string()).collect();
            continue;
        }

        let (key, value) = split_pair(line, &['=', ':']).ok_or_else(|| LineError {
            line: line_no,
            reason: "expected 'key = value'".into(),
        })?;
        if key.is_empty() {
            return Err(LineError {
                line: line_no,
                reason: "empty key".into(),
            });
        }

        let path = KeyPath::from_segments(section.iter().map(String::as_str).chain([key]));
        tree.set(&path, Value::String(unquote(value).to_string()));
    }

    Ok(tree)
}

/// Java-style properties: `key=value`, `key: value` or `key value`; `#` and
/// `!` comments; a trailing backslash continues the value on the next line.
/// Dotted keys nest.
fn parse_properties(content: &str) -> std::result::Result<Tree, LineError> {
    let mut tree = Tree::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        let logical = match pending.take() {
            Some((start, mut acc)) => {
                acc.push_str(line);
                (start, acc)
            }
            None => {
                if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                    continue;
                }
                (idx + 1, line.to_string())
            }
        };

        if let Some(stripped) = logical.1.strip_suffix('\\') {
            pending = Some((logical.0, stripped.to_string()));
            continue;
        }
        set_property(&mut tree, logical.0, &logical.1)?;
    }

    if let Some((start, acc)) = pending {
        set_property(&mut tree, start, &acc)?;
    }
    Ok(tree)
}

fn set_property(tree: &mut Tree, line_no: usize, line: &str) -> std::result::Result<(), LineError> {
    let (key, value) = split_pair(line, &['=', ':'])
        .or_else(|| {
            line.split_once(char::is_whitespace)
                .map(|(k, v)| (k.trim(), v.trim()))
        })
        .unwrap_or((line, ""));
    if key.is_empty() {
        return Err(LineError {
            line: line_no,
            reason: "empty key".into(),
        });
    }
    tree.set(&KeyPath::parse(key), Value::String(value.to_string()));
    Ok(())
}

/// Split on the first occurrence of any separator, trimming both halves.
fn split_pair<'a>(line: &'a str, separators: &[char]) -> Option<(&'a str, &'a str)> {
    let pos = line.find(separators)?;
    Some((line[..pos].trim(), line[pos + 1..].trim()))
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}
