//! Loose (coercing) equality and ordering over JSON values.
//!
//! The coercion rules:
//! - numeric strings compare numerically with numbers and each other;
//! - a number against a non-numeric string compares as text;
//! - `null` and booleans compare by truthiness, except `null` against a
//!   string, which compares as `""`;
//! - arrays compare by length, then element by element, and sort above
//!   every scalar;
//! - objects are equal when keys and values match loosely, never ordered.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::{Number, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Numeric {
    Int(i128),
    Float(f64),
}

impl Numeric {
    fn of(n: &Number) -> Numeric {
        if let Some(i) = n.as_i64() {
            Numeric::Int(i128::from(i))
        } else if let Some(u) = n.as_u64() {
            Numeric::Int(i128::from(u))
        } else {
            Numeric::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(i) => i as f64,
            Numeric::Float(f) => f,
        }
    }

    fn cmp(self, other: Numeric) -> Option<Ordering> {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

/// Parse a numeric string: optional surrounding whitespace, optional sign,
/// digits with an optional fraction and exponent.
fn numeric_string(s: &str) -> Option<Numeric> {
    let trimmed = s.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'));
    let bytes = trimmed.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;
    let mut frac_digits = 0;
    let mut integral = true;
    if i < bytes.len() && bytes[i] == b'.' {
        integral = false;
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        integral = false;
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return None;
        }
    }
    if i != bytes.len() {
        return None;
    }
    if integral {
        if let Ok(n) = trimmed.parse::<i128>() {
            return Some(Numeric::Int(n));
        }
    }
    trimmed.parse::<f64>().ok().map(Numeric::Float)
}

/// Text form of a number.
pub(crate) fn number_text(n: &Number) -> String {
    match Numeric::of(n) {
        Numeric::Int(i) => i.to_string(),
        Numeric::Float(f) => f.to_string(),
    }
}

/// Text form of a scalar; `None` for arrays and objects.
pub(crate) fn to_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(number_text(n))),
        Value::Bool(true) => Some(Cow::Borrowed("1")),
        Value::Bool(false) | Value::Null => Some(Cow::Borrowed("")),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// `null`, `false`, `0`, `""`, `"0"` and empty collections are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => match Numeric::of(n) {
            Numeric::Int(i) => i != 0,
            Numeric::Float(f) => f != 0.0,
        },
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn number_string_cmp(n: &Number, s: &str) -> Option<Ordering> {
    match numeric_string(s) {
        Some(parsed) => Numeric::of(n).cmp(parsed),
        None => Some(number_text(n).as_str().cmp(s)),
    }
}

fn string_cmp(a: &str, b: &str) -> Option<Ordering> {
    match (numeric_string(a), numeric_string(b)) {
        (Some(x), Some(y)) => x.cmp(y),
        _ => Some(a.cmp(b)),
    }
}

/// Loose equality (`==`).
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), other) | (other, Value::Bool(x)) => *x == is_truthy(other),
        (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
        (Value::Null, other) | (other, Value::Null) => !is_truthy(other),
        (Value::Number(x), Value::Number(y)) => {
            Numeric::of(x).cmp(Numeric::of(y)) == Some(Ordering::Equal)
        }
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            number_string_cmp(n, s) == Some(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => string_cmp(x, y) == Some(Ordering::Equal),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| loose_eq(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| loose_eq(v, w)))
        }
        _ => false,
    }
}

/// Loose ordering (`<`, `<=`, `>`, `>=`); `None` when the pair is unordered.
pub fn loose_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::String(s)) => Some("".cmp(s.as_str())),
        (Value::String(s), Value::Null) => Some(s.as_str().cmp("")),
        (Value::Null | Value::Bool(_), _) | (_, Value::Null | Value::Bool(_)) => {
            Some(is_truthy(a).cmp(&is_truthy(b)))
        }
        (Value::Number(x), Value::Number(y)) => Numeric::of(x).cmp(Numeric::of(y)),
        (Value::Number(n), Value::String(s)) => number_string_cmp(n, s),
        (Value::String(s), Value::Number(n)) => number_string_cmp(n, s).map(Ordering::reverse),
        (Value::String(x), Value::String(y)) => string_cmp(x, y),
        (Value::Array(x), Value::Array(y)) => {
            if x.len() != y.len() {
                return Some(x.len().cmp(&y.len()));
            }
            for (l, r) in x.iter().zip(y) {
                match loose_cmp(l, r)? {
                    Ordering::Equal => continue,
                    other => return Some(other),
                }
            }
            Some(Ordering::Equal)
        }
        (Value::Object(_), _) | (_, Value::Object(_)) => None,
        (Value::Array(_), _) => Some(Ordering::Greater),
        (_, Value::Array(_)) => Some(Ordering::Less),
    }
}

/// Whether any element of `haystack` loosely equals `needle`.
pub(crate) fn contains_loose(haystack: &[Value], needle: &Value) -> bool {
    haystack.iter().any(|item| loose_eq(item, needle))
}
