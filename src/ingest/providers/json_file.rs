// src/ingest/providers/json_file.rs
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use metrics::histogram;
use serde_json::Value;
use std::path::PathBuf;

use crate::fields::is_truthy;
use crate::ingest::types::RecordSource;

/// Decode a JSON document into raw items.
///
/// Accepts a top-level array, or an object wrapping the array under `items`
/// (preferred) or `results`. Any other object is a single item.
pub fn decode_items(content: &str) -> Result<Vec<Value>> {
    let data: Value = serde_json::from_str(content).context("parsing input json")?;
    match data {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => {
            let key = ["items", "results"]
                .into_iter()
                .find(|k| obj.get(*k).is_some_and(is_truthy));
            if let Some(key) = key {
                if obj.get(key).is_some_and(Value::is_array) {
                    if let Some(Value::Array(items)) = obj.remove(key) {
                        return Ok(items);
                    }
                }
            }
            Ok(vec![Value::Object(obj)])
        }
        _ => bail!("input JSON must be an object or array of objects"),
    }
}

/// Reads raw items from a JSON file on disk.
pub struct JsonFileSource {
    path: PathBuf,
    label: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn fetch_items(&self) -> Result<Vec<Value>> {
        let t0 = std::time::Instant::now();

        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Err(anyhow!("input file not found: {}", self.path.display()));
        }
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading input from {}", self.path.display()))?;
        let items = decode_items(&content)
            .with_context(|| format!("decoding input from {}", self.path.display()))?;

        histogram!("news_load_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        Ok(items)
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// In-memory JSON content; handy for tests and embedded samples.
pub struct JsonFixtureSource {
    content: String,
}

impl JsonFixtureSource {
    pub fn from_fixture(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

#[async_trait]
impl RecordSource for JsonFixtureSource {
    async fn fetch_items(&self) -> Result<Vec<Value>> {
        decode_items(&self.content)
    }

    fn name(&self) -> &str {
        "fixture"
    }
}
