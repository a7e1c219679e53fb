//! Scalar inference for raw command-line tokens.
//!
//! The rule set is deliberately narrow so that the outcome of a flag is easy to
//! predict:
//!
//! | Token | Result |
//! |-------|--------|
//! | `"2048"`, `'dog'`, `"dog'` | string with the first and last character stripped |
//! | empty | empty string |
//! | `2048`, `-2048`, `+7` | integer (`i64`) |
//! | `13.5`, `-0.12` | float (`f64`) |
//! | anything else | the token unchanged, as a string |
//!
//! Exponents, `inf`/`NaN`, and surrounding whitespace are never interpreted.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

// Mixed quote pairs ("dog') are accepted on purpose.
static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^("|')(.*)("|')$"#).expect("valid quote pattern"));
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid integer pattern"));
static FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+[.][0-9]+$").expect("valid float pattern"));

/// A single typed value held by a leaf of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// Human-readable name of the variant, used in type-mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Str(_) => "string",
            Scalar::Int(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => f.write_str(s),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Str(s) => serializer.serialize_str(s),
            Scalar::Int(i) => serializer.serialize_i64(*i),
            Scalar::Float(x) => serializer.serialize_f64(*x),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

/// Classify a raw token.
///
/// Quoting wins over everything else: `"2048"` stays a string. A token that
/// looks like an integer but overflows `i64` is kept as a string.
pub fn infer(token: &str) -> Scalar {
    if let Some(caps) = QUOTED.captures(token) {
        return Scalar::Str(caps[2].to_string());
    }
    if token.is_empty() {
        return Scalar::Str(String::new());
    }
    if let Some(i) = parse_integer(token) {
        return Scalar::Int(i);
    }
    if let Some(x) = parse_float(token) {
        return Scalar::Float(x);
    }
    Scalar::Str(token.to_string())
}

/// Parse `token` if it is an optionally signed run of digits that fits in `i64`.
pub fn parse_integer(token: &str) -> Option<i64> {
    if !INTEGER.is_match(token) {
        return None;
    }
    token.parse().ok()
}

/// Parse `token` if it has the `[+-]digits.digits` shape.
pub fn parse_float(token: &str) -> Option<f64> {
    if !FLOAT.is_match(token) {
        return None;
    }
    token.parse().ok()
}
