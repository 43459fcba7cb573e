// src/ingest/types.rs
use anyhow::Result;
use serde_json::Value;

/// Anything that can hand over a batch of raw (undecoded-shape) news items.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<Value>>;
    fn name(&self) -> &str;
}
