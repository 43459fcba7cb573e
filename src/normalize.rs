// src/normalize.rs
//! # Record Normalizer
//! Pure mapping from one raw news item to a `CanonicalRecord`.
//! No I/O, no shared state; safe to call from many threads on independent items.
//!
//! Field fallbacks:
//! - `sourceLogoUrl` → `logoUrl`, `storyPath` → `url` (first truthy wins)
//! - `descriptionText` → `astDescription` → `shortDescription` (raw values)
//! - `shortDescription`: raw value if non-empty after cleaning, else `descriptionText`
//!   shortened to 200 chars

use crate::fields::{
    coerce_timestamp, normalize_symbol_list, normalize_whitespace, shorten_text, value_to_text,
};
use crate::record::{CanonicalRecord, RawRecord, Urgency};

/// Length budget for auto-derived short descriptions.
pub const SHORT_DESCRIPTION_LEN: usize = 200;

/// Normalize one raw item. Total: every field has a typed default.
pub fn normalize(raw: &RawRecord<'_>) -> CanonicalRecord {
    let id = raw
        .first_truthy(&["id"])
        .map(|v| value_to_text(v).trim().to_string())
        .unwrap_or_default();

    let description_text = raw.text_or(&["descriptionText", "astDescription", "shortDescription"]);

    let mut short_description = raw.text("shortDescription");
    if short_description.is_empty() && !description_text.is_empty() {
        short_description = shorten_text(&description_text, SHORT_DESCRIPTION_LEN);
    }

    CanonicalRecord {
        id,
        title: raw.text("title"),
        provider: raw.text("provider"),
        source_logo_url: raw.text_or(&["sourceLogoUrl", "logoUrl"]),
        published: coerce_timestamp(raw.get("published")),
        source: raw.text("source"),
        urgency: Urgency::from_value(raw.get("urgency")),
        permission: raw.text("permission"),
        related_symbols: normalize_symbol_list(raw.get("relatedSymbols")),
        story_path: raw.text_or(&["storyPath", "url"]),
        ast_description: normalize_whitespace(raw.get("astDescription")),
        description_text,
        short_description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RelatedSymbol;
    use serde_json::{json, Value};

    fn norm(v: Value) -> CanonicalRecord {
        normalize(&RawRecord::from_value(&v).unwrap())
    }

    #[test]
    fn empty_object_gets_defaults() {
        let r = norm(json!({}));
        assert_eq!(r.id, "");
        assert_eq!(r.title, "");
        assert_eq!(r.published, None);
        assert_eq!(r.urgency, Urgency::Absent);
        assert!(r.related_symbols.is_empty());
        assert_eq!(r.short_description, "");
    }

    #[test]
    fn maps_and_cleans_fields() {
        let r = norm(json!({
            "id": 12345,
            "title": " Fed  holds\nrates ",
            "provider": "Reuters",
            "logoUrl": "https://s/logo.svg",
            "published": "2023-06-05T12:00:00Z",
            "urgency": 2,
            "url": "/news/x",
            "relatedSymbols": [{"symbol": "NASDAQ:GOOG", "logoid": "alphabet"}]
        }));
        assert_eq!(r.id, "12345");
        assert_eq!(r.title, "Fed holds rates");
        assert_eq!(r.source_logo_url, "https://s/logo.svg");
        assert_eq!(r.published, Some(1_685_966_400));
        assert_eq!(r.urgency, Urgency::Level(2));
        assert_eq!(r.story_path, "/news/x");
        assert_eq!(r.related_symbols[0].logo_id, "alphabet");
    }

    #[test]
    fn primary_keys_win_over_fallbacks() {
        let r = norm(json!({"sourceLogoUrl": "a", "logoUrl": "b", "storyPath": "p", "url": "u"}));
        assert_eq!(r.source_logo_url, "a");
        assert_eq!(r.story_path, "p");
    }

    #[test]
    fn description_priority_uses_raw_values() {
        let r = norm(json!({"astDescription": " ast  text ", "shortDescription": "short"}));
        assert_eq!(r.description_text, "ast text");
        assert_eq!(r.ast_description, "ast text");
        assert_eq!(r.short_description, "short");

        // whitespace-only descriptionText is truthy on the raw record and wins
        let r = norm(json!({"descriptionText": "   ", "astDescription": "ast"}));
        assert_eq!(r.description_text, "");
        assert_eq!(r.short_description, "");

        let r = norm(json!({"descriptionText": "full text", "shortDescription": " \n "}));
        assert_eq!(r.short_description, "full text");
    }

    #[test]
    fn short_description_is_derived_when_missing() {
        let long = "word ".repeat(100);
        let r = norm(json!({"descriptionText": long}));
        assert!(r.short_description.chars().count() <= SHORT_DESCRIPTION_LEN);
        assert!(r.short_description.ends_with('\u{2026}'));
        assert!(r.description_text.starts_with(r.short_description.trim_end_matches('\u{2026}')));
    }

    #[test]
    fn id_is_trimmed_not_collapsed() {
        let r = norm(json!({"id": "  tag:a  b "}));
        assert_eq!(r.id, "tag:a  b");
        assert_eq!(norm(json!({"id": 0})).id, "");
    }

    #[test]
    fn renormalizing_output_is_stable() {
        let first = norm(json!({
            "id": " 1 ",
            "title": "A\tB",
            "descriptionText": "lorem ipsum ".repeat(40),
            "urgency": "3",
            "relatedSymbols": ["AAPL", {"symbol": "MSFT", "logoId": "ms"}]
        }));
        let again = norm(serde_json::to_value(&first).unwrap());
        assert_eq!(first, again);
        assert_eq!(again.related_symbols[1], RelatedSymbol {
            symbol: "MSFT".into(),
            logo_id: "ms".into(),
            logo_url: String::new(),
        });
    }

    #[test]
    fn falsy_raw_description_is_not_a_fixed_point() {
        // `0` is skipped by the truthy fallback but rendered into its own field.
        let first = norm(json!({"astDescription": 0}));
        assert_eq!(first.description_text, "");
        assert_eq!(first.ast_description, "0");

        let again = norm(serde_json::to_value(&first).unwrap());
        assert_eq!(again.description_text, "0");
        assert_eq!(again.short_description, "0");
    }
}
