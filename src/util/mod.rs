//! Small utility helpers for URL encoding, lenient JSON decoding and display formatting.
//!
//! The backend is loose about JSON types (ports arrive as numbers or strings,
//! flags as booleans or `"1"`), so the deserialisers here accept every shape the
//! service is known to emit instead of failing the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt::Write;

/// What: Percent-encode a string for use in URLs according to RFC 3986.
///
/// Inputs:
/// - `input`: String to encode.
///
/// Output:
/// - Returns a percent-encoded string where reserved characters are escaped.
///
/// Details:
/// - Unreserved characters as per RFC 3986 (`A-Z`, `a-z`, `0-9`, `-`, `.`, `_`, `~`) are left as-is.
/// - Space is encoded as `%20` (not `+`).
/// - All other bytes are encoded as two uppercase hexadecimal digits prefixed by `%`.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for &b in input.as_bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push_str("%20"),
            _ => {
                out.push('%');
                let _ = write!(out, "{b:02X}");
            }
        }
    }
    out
}

/// What: Render a JSON scalar as display text.
///
/// Inputs:
/// - `v`: Any JSON value.
///
/// Output:
/// - `Some(text)` for non-empty strings, numbers and `true`; `None` for null, `false`,
///   empty strings, arrays and objects.
#[must_use]
pub fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// What: Evaluate JSON truthiness the way the service's own web pages do.
///
/// Inputs:
/// - `v`: Any JSON value.
///
/// Output:
/// - `false` for null, `false`, `0`, `""`; `true` otherwise.
#[must_use]
pub fn value_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// What: Extract an unsigned integer from a number or numeric string.
///
/// Inputs:
/// - `v`: JSON value.
///
/// Output:
/// - `Some(u64)` when the value is a non-negative integer or parses as one; `None` otherwise.
#[must_use]
pub fn value_u64(v: &Value) -> Option<u64> {
    if let Some(u) = v.as_u64() {
        return Some(u);
    }
    if let Some(i) = v.as_i64()
        && let Ok(u) = u64::try_from(i)
    {
        return Some(u);
    }
    v.as_str().and_then(|s| s.trim().parse::<u64>().ok())
}

/// Deserialize any scalar into optional display text (see [`value_text`]).
///
/// # Errors
/// - Only when the underlying deserializer fails to produce a JSON value.
pub fn de_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(value_text(&v))
}

/// Deserialize any JSON value into its truthiness (see [`value_truthy`]).
///
/// # Errors
/// - Only when the underlying deserializer fails to produce a JSON value.
pub fn de_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(value_truthy(&v))
}

/// Deserialize a tri-state flag: `None` when null, otherwise its truthiness.
///
/// # Errors
/// - Only when the underlying deserializer fails to produce a JSON value.
pub fn de_opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(if v.is_null() {
        None
    } else {
        Some(value_truthy(&v))
    })
}

/// Deserialize an optional unsigned integer (see [`value_u64`]).
///
/// # Errors
/// - Only when the underlying deserializer fails to produce a JSON value.
pub fn de_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(value_u64(&v))
}

/// Deserialize a list of strings, dropping non-string entries and treating null as empty.
///
/// # Errors
/// - Only when the underlying deserializer fails to produce a JSON value.
pub fn de_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(v.as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|e| e.as_str().map(ToOwned::to_owned))
                .collect()
        })
        .unwrap_or_default())
}

/// What: Format a byte count as mebibytes with one decimal place.
///
/// Inputs:
/// - `bytes`: Size in bytes; `None` or zero means unknown.
///
/// Output:
/// - `"12.3 MB"` style text, or `"size ?"` when unknown.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_megabytes(bytes: Option<u64>) -> String {
    match bytes {
        Some(b) if b > 0 => format!("{:.1} MB", b as f64 / (1024.0 * 1024.0)),
        _ => "size ?".to_string(),
    }
}

/// What: Turn a server-provided name into a safe `.nzb` file name.
///
/// Inputs:
/// - `name`: Raw file name (may contain path separators or be blank).
/// - `fallback`: Used when `name` is blank after cleaning.
///
/// Output:
/// - A single path component ending in `.nzb`.
///
/// Details:
/// - Path separators, NUL and `..` sequences are replaced so the result can never escape
///   the download directory.
#[must_use]
pub fn nzb_file_name(name: &str, fallback: &str) -> String {
    let clean = |raw: &str| -> String {
        raw.trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | '\0' | ':' => '_',
                other => other,
            })
            .collect::<String>()
            .replace("..", "_")
    };
    let mut file = clean(name);
    if file.is_empty() {
        file = clean(fallback);
    }
    if file.is_empty() {
        file = "release".to_string();
    }
    if !file.to_ascii_lowercase().ends_with(".nzb") {
        file.push_str(".nzb");
    }
    file
}
