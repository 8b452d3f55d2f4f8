//! Typed reads over untyped settings.
//!
//! Values reach the engine in two shapes: native scalars from structured
//! documents (`35`, `true`) and raw strings from env vars and flags (`"35"`,
//! `"true"`). Each target type accepts both. A value that fits neither is a
//! [`ConfigError::TypeCoercion`](crate::ConfigError::TypeCoercion), never a
//! silent default.

use std::time::Duration;

use crate::tree::Tree;
use crate::value::Value;

/// A type that can be read out of a [`Value`].
pub trait Coerce: Sized {
    /// Name used in error messages.
    const EXPECTED: &'static str;

    fn coerce(value: &Value) -> Option<Self>;
}

impl Coerce for bool {
    const EXPECTED: &'static str = "boolean";

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Integer(i) => Some(*i != 0),
            Value::String(s) => parse_bool(s),
            _ => None,
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "y" | "yes" | "on" => Some(true),
        "0" | "f" | "false" | "n" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Coerce for i64 {
    const EXPECTED: &'static str = "integer";

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(*i),
            Value::Float(f) if f.is_finite() => {
                let t = f.trunc();
                (t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
            }
            Value::Bool(b) => Some(i64::from(*b)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl Coerce for f64 {
    const EXPECTED: &'static str = "float";

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl Coerce for String {
    const EXPECTED: &'static str = "string";

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Integer(_) | Value::Float(_) | Value::Bool(_) | Value::Datetime(_) => {
                Some(value.to_string())
            }
            _ => None,
        }
    }
}

/// Numbers are seconds. Strings are either a bare number of seconds or a
/// sequence of `<number><unit>` terms, e.g. `1h30m`, `1.5s`, `250ms`.
impl Coerce for Duration {
    const EXPECTED: &'static str = "duration";

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => u64::try_from(*i).ok().map(Duration::from_secs),
            Value::Float(f) => Duration::try_from_secs_f64(*f).ok(),
            Value::String(s) => parse_duration(s),
            _ => None,
        }
    }
}

pub(crate) fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(secs) = s.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).ok();
    }

    let mut rest = s;
    let mut nanos = 0f64;
    while !rest.is_empty() {
        let num_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_end == 0 {
            return None;
        }
        let amount: f64 = rest[..num_end].parse().ok()?;
        rest = &rest[num_end..];

        let unit_end = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_end] {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 6e10,
            "h" => 3.6e12,
            _ => return None,
        };
        nanos += amount * scale;
        rest = &rest[unit_end..];
    }
    Duration::try_from_secs_f64(nanos / 1e9).ok()
}

impl Coerce for Vec<Value> {
    const EXPECTED: &'static str = "sequence";

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(items.clone()),
            _ => None,
        }
    }
}

/// Arrays of string-like items, or a single string split on whitespace.
impl Coerce for Vec<String> {
    const EXPECTED: &'static str = "string sequence";

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => items.iter().map(String::coerce).collect(),
            Value::String(s) => Some(s.split_whitespace().map(str::to_string).collect()),
            _ => None,
        }
    }
}

impl Coerce for Tree {
    const EXPECTED: &'static str = "table";

    fn coerce(value: &Value) -> Option<Self> {
        value.as_table().cloned()
    }
}
