// tests/filter_batch.rs
use serde_json::{json, Value};
use tv_news_normalizer::{matches, normalize, process, process_detailed, FilterConfig, RawRecord};

fn input() -> Vec<Value> {
    vec![json!({
        "id": "1",
        "title": " Hello  World ",
        "provider": "Reuters",
        "urgency": 5,
        "relatedSymbols": ["NASDAQ:GOOG"]
    })]
}

#[test]
fn min_urgency_keeps_urgent_item() {
    let out = process(&input(), &FilterConfig::default().with_min_urgency(Some(3)));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].title, "Hello World");
    assert_eq!(out[0].related_symbols[0].symbol, "NASDAQ:GOOG");
    assert_eq!(serde_json::to_value(&out[0].urgency).unwrap(), json!(5));
}

#[test]
fn provider_filter_excludes() {
    let out = process(&input(), &FilterConfig::default().with_provider("bloomberg"));
    assert!(out.is_empty());
}

#[test]
fn missing_urgency_fails_threshold() {
    let v = json!({"title": "calm"});
    let rec = normalize(&RawRecord::from_value(&v).unwrap());
    assert!(!matches(&rec, &FilterConfig::default().with_min_urgency(Some(3))));
    assert!(matches(&rec, &FilterConfig::default()));
}

#[test]
fn symbol_filter_is_case_insensitive() {
    let cfg = FilterConfig::new(Some(["Nasdaq:Goog"]), None, None);
    assert_eq!(process(&input(), &cfg).len(), 1);
    let cfg = FilterConfig::new(Some(["NYSE:IBM"]), None, None);
    assert!(process(&input(), &cfg).is_empty());
}

#[test]
fn malformed_then_valid() {
    let mut items = vec![json!("not a mapping")];
    items.extend(input());
    let out = process_detailed(&items, &FilterConfig::default());
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.malformed, 1);
}
