// tests/metrics_batch.rs
use std::collections::HashMap;
use std::io::Write;

use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
use serde_json::json;
use tv_news_normalizer::ingest::{run_once, JsonFileSource, JsonFixtureSource};
use tv_news_normalizer::ingest::types::RecordSource;
use tv_news_normalizer::{process_detailed, FilterConfig};

fn series(snapshotter: &Snapshotter) -> HashMap<String, DebugValue> {
    snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .map(|(key, _, _, value)| (key.key().name().to_string(), value))
        .collect()
}

fn counter(map: &HashMap<String, DebugValue>, name: &str) -> u64 {
    match map.get(name) {
        Some(DebugValue::Counter(n)) => *n,
        other => panic!("{name}: expected counter, got {other:?}"),
    }
}

#[test]
fn batch_counters_track_each_outcome() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let items = vec![
        json!({"id": "1", "provider": "Reuters"}),
        json!("not-a-record"),
        json!({"id": "2", "provider": "Bloomberg"}),
    ];
    let cfg = FilterConfig::default().with_provider("reuters");
    let out = metrics::with_local_recorder(&recorder, || process_detailed(&items, &cfg));
    assert_eq!(out.records.len(), 1);

    let map = series(&snapshotter);
    assert_eq!(counter(&map, "news_items_total"), 3);
    assert_eq!(counter(&map, "news_kept_total"), 1);
    assert_eq!(counter(&map, "news_malformed_total"), 1);
    assert_eq!(counter(&map, "news_filtered_total"), 1);
    assert_eq!(counter(&map, "news_failed_total"), 0);
}

#[test]
fn pipeline_run_records_load_time_and_last_run() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"[{"id":"a"},{"id":"b"}]"#).unwrap();

    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let sources: Vec<Box<dyn RecordSource>> = vec![
        Box::new(JsonFileSource::new(file.path())),
        Box::new(JsonFixtureSource::from_fixture(r#"{"items":[{"id":"c"}]}"#)),
    ];
    let outcome = metrics::with_local_recorder(&recorder, || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(run_once(&sources, &FilterConfig::default()))
    })
    .unwrap();
    assert_eq!(outcome.records.len(), 3);

    let map = series(&snapshotter);
    match map.get("news_load_ms") {
        Some(DebugValue::Histogram(samples)) => assert_eq!(samples.len(), 1),
        other => panic!("news_load_ms: expected histogram, got {other:?}"),
    }
    match map.get("news_pipeline_last_run_ts") {
        Some(DebugValue::Gauge(ts)) => assert!(ts.0 > 1_600_000_000.0),
        other => panic!("news_pipeline_last_run_ts: expected gauge, got {other:?}"),
    }
    assert_eq!(counter(&map, "news_kept_total"), 3);
}
