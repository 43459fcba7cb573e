// src/fields.rs
//! # Field Normalizers
//!
//! Pure helpers that turn one loosely-typed JSON value into one canonical value.
//! None of them fail: malformed input resolves to an empty/absent default.
//!
//! - `normalize_whitespace`: collapse whitespace runs, trim.
//! - `coerce_timestamp`: numbers, digit strings and ISO-8601 dates → unix seconds.
//! - `normalize_symbol_list`: objects/strings → ordered `RelatedSymbol`s.
//! - `shorten_text`: word-boundary truncation with a trailing ellipsis.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::record::RelatedSymbol;

/// Default cap used by `shorten_text` callers that have no specific budget.
pub const DEFAULT_SHORTEN_LEN: usize = 220;

/// Appended to text cut by `shorten_text`.
pub const ELLIPSIS: char = '\u{2026}';

static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Render a JSON value as plain text (strings unquoted, containers as compact JSON).
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Truthiness of a raw value: null, `false`, zero and empty strings/containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Collapse whitespace runs (newlines, tabs, NBSP, ...) into single spaces and trim.
/// Absent or null input yields an empty string.
pub fn normalize_whitespace(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(v) => collapse_ws(&value_to_text(v)),
    }
}

pub(crate) fn collapse_ws(s: &str) -> String {
    RE_WS.replace_all(s, " ").trim().to_string()
}

/// Coerce a raw value into unix seconds.
///
/// Accepts integers, floats (truncated toward zero), digit-only strings and
/// ISO-8601 dates. Anything else is `None`.
pub fn coerce_timestamp(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    let parsed = match value {
        Value::Null => return None,
        Value::Number(n) => number_to_secs(n),
        Value::String(s) => string_to_secs(s.trim()),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    };
    if parsed.is_none() {
        debug!(value = %value, "could not parse timestamp");
    }
    parsed
}

fn number_to_secs(n: &serde_json::Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?.trunc();
    // i64::MAX is not exactly representable; the half-open range keeps the cast lossless.
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn string_to_secs(text: &str) -> Option<i64> {
    if text.is_empty() {
        return None;
    }
    if text.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(secs) = text.parse::<i64>() {
            return Some(secs);
        }
    }
    parse_calendar(text)
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// ISO-8601 parsing. A trailing `Z` forces the wall-clock time to be read as UTC;
/// a timestamp without an offset is assumed to be UTC as well.
fn parse_calendar(text: &str) -> Option<i64> {
    if let Some(body) = text.strip_suffix('Z') {
        let wall = parse_with_offset(body)
            .map(|dt| dt.naive_local())
            .or_else(|| parse_naive(body))?;
        return Some(wall.and_utc().timestamp());
    }
    if let Some(dt) = parse_with_offset(text) {
        return Some(dt.timestamp());
    }
    parse_naive(text).map(|wall| wall.and_utc().timestamp())
}

fn parse_with_offset(text: &str) -> Option<DateTime<chrono::FixedOffset>> {
    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| parse_hour_only(text))
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// `2023-06-05T12`: chrono needs minutes, so pad them in.
fn parse_hour_only(text: &str) -> Option<NaiveDateTime> {
    let padded = format!("{text}:00");
    ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&padded, fmt).ok())
}

/// Canonicalize a `relatedSymbols` value.
///
/// Lists keep their order; object members read `symbol`, `logoid`/`logoId` and
/// `logourl`/`logoUrl` (first truthy wins), string members become bare symbols.
/// Entries with an empty symbol and members of any other shape are dropped.
/// A lone object is treated as a one-element list.
pub fn normalize_symbol_list(value: Option<&Value>) -> Vec<RelatedSymbol> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(symbol_from_item).collect(),
        Some(obj @ Value::Object(_)) => symbol_from_item(obj).into_iter().collect(),
        _ => Vec::new(),
    }
}

fn symbol_from_item(item: &Value) -> Option<RelatedSymbol> {
    match item {
        Value::Object(map) => {
            let symbol = map
                .get("symbol")
                .map(value_to_text)
                .unwrap_or_default()
                .trim()
                .to_string();
            if symbol.is_empty() {
                return None;
            }
            let pick = |keys: [&str; 2]| {
                keys.iter()
                    .filter_map(|k| map.get(*k))
                    .find(|v| is_truthy(v))
                    .map(value_to_text)
                    .unwrap_or_default()
            };
            Some(RelatedSymbol {
                symbol,
                logo_id: pick(["logoid", "logoId"]),
                logo_url: pick(["logourl", "logoUrl"]),
            })
        }
        Value::String(s) => {
            let symbol = s.trim();
            if symbol.is_empty() {
                None
            } else {
                Some(RelatedSymbol::bare(symbol))
            }
        }
        _ => None,
    }
}

/// Shorten `text` to at most `max_length` characters, backing off to the last
/// space so words are not split, and append an ellipsis.
pub fn shorten_text(text: &str, max_length: usize) -> String {
    let text = collapse_ws(text);
    if text.chars().count() <= max_length {
        return text;
    }

    let mut truncated: String = text.chars().take(max_length.saturating_sub(1)).collect();
    if let Some(pos) = truncated.rfind(' ') {
        if pos > 0 {
            truncated.truncate(pos);
        }
    }
    truncated.push(ELLIPSIS);
    truncated
}
