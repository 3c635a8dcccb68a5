//! Tolerant conversions from loosely typed table fields.
//!
//! None of these functions fail: malformed input degrades to `None` or an
//! empty list so one noisy record never breaks ingestion.

use serde_json::Value;

/// Coerce a field to a finite number
///
/// Accepts JSON numbers and numeric strings. Strings are read like a
/// lenient float parser would: leading whitespace is skipped and the
/// longest numeric prefix is used (`"34.05 N"` becomes `34.05`).
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_numeric_prefix(s),
        _ => None,
    }
}

/// Coerce a field to a trimmed, non-empty string
///
/// Numbers and booleans are rendered as text; lists are joined with
/// commas. Objects and blank values yield `None`.
pub fn to_nullable_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null | Value::Object(_) => return None,
        Value::Array(items) => items
            .iter()
            .filter_map(stringify_element)
            .collect::<Vec<_>>()
            .join(","),
        other => stringify_element(other)?,
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Shape of a raw cuisines field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CuisineShape<'a> {
    /// Already a native list
    List(&'a [Value]),
    /// Bracketed text that may be a JSON array
    JsonLike(&'a str),
    /// Free text separated by commas
    Delimited(&'a str),
    /// Anything else
    Other,
}

impl<'a> CuisineShape<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => CuisineShape::List(items),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.starts_with('[') && trimmed.ends_with(']') {
                    CuisineShape::JsonLike(trimmed)
                } else {
                    CuisineShape::Delimited(trimmed)
                }
            }
            _ => CuisineShape::Other,
        }
    }
}

/// Turn a cuisines field into an ordered list of non-empty, trimmed names
///
/// Order is preserved and duplicates are kept.
pub fn normalize_cuisine_list(value: &Value) -> Vec<String> {
    match CuisineShape::classify(value) {
        CuisineShape::List(items) => from_items(items),
        CuisineShape::JsonLike(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => from_items(&items),
            _ => split_delimited(text),
        },
        CuisineShape::Delimited(text) => split_delimited(text),
        CuisineShape::Other => Vec::new(),
    }
}

fn from_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(stringify_element)
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn split_delimited(text: &str) -> Vec<String> {
    let text = text.strip_prefix('[').unwrap_or(text);
    let text = text.strip_suffix(']').unwrap_or(text);

    text.split(',')
        .map(|part| strip_quotes(part.trim()).trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

fn strip_quotes(part: &str) -> &str {
    part.trim_matches(|c| c == '"' || c == '\'')
}

fn stringify_element(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(stringify_element)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Null | Value::Object(_) => None,
    }
}

/// Longest prefix of `s` (after leading whitespace) that reads as a decimal float
fn parse_numeric_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
