// nmlio/src/value.rs

//! Namelist values and the lexeme <-> scalar conversion boundary.
//!
//! `to_native` interprets a raw lexeme by trying the scalar types in a
//! fixed priority order and taking the first success; `to_literal` is the
//! inverse formatter used by the writer. The ordering matters: a bare `1`
//! must become an integer, not a float, and logical tokens must win over
//! the string fallback.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value assigned to a namelist variable: one scalar of the four
/// supported kinds, or a flat sequence of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value
    Int(i64),
    /// Real (floating-point) value
    Real(f64),
    /// Logical (boolean) value
    Logical(bool),
    /// Character string
    Str(String),
    /// Flat array of scalars with a promoted common element type
    Array(Vec<Value>),
}

impl Value {
    /// Convert a raw lexeme to a typed scalar, trying integer, float,
    /// boolean and string interpretation in that order. The string
    /// fallback always accepts, so this cannot fail.
    pub fn to_native(lexeme: &str) -> Value {
        let trimmed = lexeme.trim();
        if let Some(v) = parse_int(trimmed) {
            return v;
        }
        if let Some(v) = parse_real(trimmed) {
            return v;
        }
        if let Some(v) = parse_logical(trimmed) {
            return v;
        }
        parse_str(trimmed)
    }

    /// Format this value as a namelist literal. Array elements are
    /// converted individually and joined with single spaces.
    pub fn to_literal(&self) -> String {
        match self {
            Value::Int(i) => i.to_string(),
            Value::Real(f) => format_real(*f),
            Value::Logical(b) => {
                if *b {
                    ".true.".to_string()
                } else {
                    ".false.".to_string()
                }
            }
            Value::Str(s) => format!("'{}'", s.replace('\'', "''")),
            Value::Array(values) => {
                let parts: Vec<String> = values.iter().map(Value::to_literal).collect();
                parts.join(" ")
            }
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Real accessor; integers widen for convenience.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_logical(&self) -> Option<bool> {
        match self {
            Value::Logical(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    /// True for `Real`, used by array element promotion.
    pub fn is_real(&self) -> bool {
        matches!(self, Value::Real(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_literal())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Logical(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

fn parse_int(lexeme: &str) -> Option<Value> {
    lexeme.parse::<i64>().ok().map(Value::Int)
}

fn parse_real(lexeme: &str) -> Option<Value> {
    match lexeme.to_lowercase().as_str() {
        "inf" | "+inf" | "infinity" | "+infinity" => return Some(Value::Real(f64::INFINITY)),
        "-inf" | "-infinity" => return Some(Value::Real(f64::NEG_INFINITY)),
        "nan" | "+nan" | "-nan" => return Some(Value::Real(f64::NAN)),
        _ => {}
    }

    // Fortran double-precision exponents use `d`/`D` where Rust expects `e`.
    let normalized = match lexeme.find(['d', 'D']) {
        Some(pos) => {
            let mut s = lexeme.to_string();
            s.replace_range(pos..pos + 1, "e");
            s
        }
        None => lexeme.to_string(),
    };

    normalized.parse::<f64>().ok().map(Value::Real)
}

fn parse_logical(lexeme: &str) -> Option<Value> {
    let lower = lexeme.to_lowercase();
    match lower.as_str() {
        ".true." | ".t." | "true" | "t" => Some(Value::Logical(true)),
        ".false." | ".f." | "false" | "f" => Some(Value::Logical(false)),
        _ => {
            if lower.starts_with(".t") {
                Some(Value::Logical(true))
            } else if lower.starts_with(".f") {
                Some(Value::Logical(false))
            } else {
                None
            }
        }
    }
}

/// String fallback: strip matching outer quotes and collapse doubled
/// delimiters; unquoted text is taken verbatim.
fn parse_str(lexeme: &str) -> Value {
    if lexeme.len() >= 2 {
        let first = lexeme.chars().next().unwrap();
        if (first == '\'' || first == '"') && lexeme.ends_with(first) {
            let inner = &lexeme[1..lexeme.len() - 1];
            let unescaped = if first == '\'' {
                inner.replace("''", "'")
            } else {
                inner.replace("\"\"", "\"")
            };
            return Value::Str(unescaped);
        }
    }
    Value::Str(lexeme.to_string())
}

/// Format a real so that it reads back as a real: always a decimal point
/// or exponent, with the IEEE specials spelled out.
fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+inf" } else { "-inf" }.to_string();
    }
    let s = value.to_string();
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{}.0", s)
    }
}
