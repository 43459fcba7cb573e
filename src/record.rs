// src/record.rs
//! Raw input view and the canonical news record.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::fields::{is_truthy, normalize_whitespace};

/// Borrowed, read-only view over one raw news item (a JSON object).
///
/// Missing keys and JSON `null` both read as absent.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawRecord<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// `Some` only for JSON objects.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(Self::new)
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    /// Whitespace-normalized text for `key`; empty when absent.
    pub fn text(&self, key: &str) -> String {
        normalize_whitespace(self.get(key))
    }

    /// First value among `keys` that is truthy (non-empty, non-zero, not `false`).
    pub fn first_truthy(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|k| self.fields.get(*k))
            .find(|v| is_truthy(v))
    }

    /// Whitespace-normalized text of the first truthy value among `keys`.
    pub fn text_or(&self, keys: &[&str]) -> String {
        normalize_whitespace(self.first_truthy(keys))
    }
}

/// One entry of `relatedSymbols`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedSymbol {
    pub symbol: String,
    #[serde(default)]
    pub logo_id: String,
    #[serde(default)]
    pub logo_url: String,
}

impl RelatedSymbol {
    /// Symbol without logo metadata.
    pub fn bare(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            logo_id: String::new(),
            logo_url: String::new(),
        }
    }
}

/// Urgency as delivered by the provider; never coerced at normalization time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Urgency {
    #[default]
    Absent,
    /// A JSON integer.
    Level(i64),
    /// Any other JSON value, kept verbatim.
    Raw(Value),
}

impl Urgency {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Urgency::Absent,
            Some(other) => match other.as_i64() {
                Some(n) => Urgency::Level(n),
                None => Urgency::Raw(other.clone()),
            },
        }
    }

    /// Integer interpretation used by the urgency filter.
    ///
    /// Floats truncate toward zero, strings must hold a signed decimal integer.
    /// Booleans and containers have no level.
    pub fn as_level(&self) -> Option<i64> {
        match self {
            Urgency::Absent => None,
            Urgency::Level(n) => Some(*n),
            Urgency::Raw(Value::Number(n)) => {
                let f = n.as_f64()?.trunc();
                (f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
            }
            Urgency::Raw(Value::String(s)) => s.trim().parse::<i64>().ok(),
            Urgency::Raw(_) => None,
        }
    }
}

impl Serialize for Urgency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Urgency::Absent => serializer.serialize_none(),
            Urgency::Level(n) => serializer.serialize_i64(*n),
            Urgency::Raw(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Urgency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(deserializer)?;
        Ok(Urgency::from_value(Some(&v)))
    }
}

/// The normalized, fixed-shape news record.
///
/// Built once from a raw item and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    pub id: String,
    pub title: String,
    pub provider: String,
    pub source_logo_url: String,
    /// Unix seconds.
    pub published: Option<i64>,
    pub source: String,
    #[serde(default)]
    pub urgency: Urgency,
    pub permission: String,
    pub related_symbols: Vec<RelatedSymbol>,
    pub story_path: String,
    pub ast_description: String,
    pub description_text: String,
    pub short_description: String,
}

impl CanonicalRecord {
    /// Serialized field names in schema order.
    pub const FIELDS: [&'static str; 13] = [
        "id",
        "title",
        "provider",
        "sourceLogoUrl",
        "published",
        "source",
        "urgency",
        "permission",
        "relatedSymbols",
        "storyPath",
        "astDescription",
        "descriptionText",
        "shortDescription",
    ];
}
