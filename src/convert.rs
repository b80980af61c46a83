//! Token conversion: the leaf of the rule engine.
//!
//! A [`Conversion`] decides, for a single token, whether it is acceptable at a
//! given position and what typed [`Value`] it becomes. Failures are plain
//! `None` values; nothing in this module panics on malformed text.

use crate::command::CommandKind;
use std::fmt;
use std::path::Path;

/// A typed value produced from a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Text kept as-is (file names, item names, matched keywords).
    Text(String),
    /// A non-negative integer.
    Int(u64),
    /// A command kind resolved from a keyword.
    Kind(CommandKind),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<u64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_kind(&self) -> Option<CommandKind> {
        match self {
            Value::Kind(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Converts a raw token into a value, or rejects it.
pub type Converter = fn(&str) -> Option<Value>;

/// Converts an already converted value into another one, or rejects it.
pub type Refiner = fn(&Value) -> Option<Value>;

/// Per-position rule: either an exact keyword or a conversion function.
#[derive(Clone, Copy)]
pub enum Conversion {
    /// The token must equal this string exactly (case-sensitive).
    /// The matched token is kept as [`Value::Text`].
    Literal(&'static str),
    /// The token is handed to the converter.
    Convert(Converter),
}

impl Conversion {
    /// Applies this rule to `token`.
    pub fn apply(&self, token: &str) -> Option<Value> {
        match self {
            Conversion::Literal(expected) => {
                (token == *expected).then(|| Value::Text(token.to_owned()))
            }
            Conversion::Convert(convert) => convert(token),
        }
    }
}

impl fmt::Debug for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conversion::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Conversion::Convert(_) => f.write_str("Convert(..)"),
        }
    }
}

/// Accepts any token as text.
pub fn text(token: &str) -> Option<Value> {
    Some(Value::Text(token.to_owned()))
}

/// Accepts a non-negative decimal integer, ignoring surrounding whitespace.
pub fn int(token: &str) -> Option<Value> {
    token.trim().parse::<u64>().ok().map(Value::Int)
}

/// Turns a matched keyword into its [`CommandKind`].
pub fn to_kind(value: &Value) -> Option<Value> {
    value
        .as_text()
        .map(|name| Value::Kind(CommandKind::from_name(name)))
}

/// Drops the final extension from a file name: `data/ward.csv` -> `data/ward`.
pub fn strip_extension(value: &Value) -> Option<Value> {
    let name = value.as_text()?;
    let stripped = Path::new(name).with_extension("");
    Some(Value::Text(stripped.to_string_lossy().into_owned()))
}
