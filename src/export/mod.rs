// src/export/mod.rs
//! Writers that commit a batch of canonical records to disk.
//!
//! Every writer:
//! - does nothing (and warns) for an empty batch, so no empty file is created;
//! - creates missing parent directories;
//! - logs the destination and item count on success.

pub mod csv;
pub mod excel;
pub mod json;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use crate::record::CanonicalRecord;

pub use self::csv::export_csv;
pub use self::excel::export_excel;
pub use self::json::export_json;

/// Output artifact kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Excel,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Excel => "xlsx",
        }
    }

    /// File name used when no explicit output path is given.
    pub fn default_file_name(self) -> String {
        format!("tradingview_news.{}", self.extension())
    }
}

/// Write `items` to `path` in the requested format.
pub fn export(items: &[CanonicalRecord], format: OutputFormat, path: &Path) -> Result<()> {
    match format {
        OutputFormat::Json => export_json(items, path),
        OutputFormat::Csv => export_csv(items, path),
        OutputFormat::Excel => export_excel(items, path),
    }
}

/// Returns `false` (after warning) when there is nothing to write.
fn prepare(items: &[CanonicalRecord], path: &Path, kind: &str) -> Result<bool> {
    if items.is_empty() {
        tracing::warn!(kind, "no items to export; file will not be created");
        return Ok(false);
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }
    Ok(true)
}

/// Plain-text rendering of one cell: nested values become compact JSON.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn record_map(item: &CanonicalRecord) -> Result<serde_json::Map<String, Value>> {
    match serde_json::to_value(item).context("serializing record")? {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("record did not serialize to an object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cell_text_flattens_nested_values() {
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&json!("a b")), "a b");
        assert_eq!(cell_text(&json!(5)), "5");
        assert_eq!(cell_text(&json!([{"symbol": "X"}])), r#"[{"symbol":"X"}]"#);
    }

    #[test]
    fn extensions_match_formats() {
        assert_eq!(OutputFormat::Excel.default_file_name(), "tradingview_news.xlsx");
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }
}
