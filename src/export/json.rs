// src/export/json.rs
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::record::CanonicalRecord;

/// Pretty-printed JSON array, UTF-8 without ASCII escaping.
pub fn export_json(items: &[CanonicalRecord], path: &Path) -> Result<()> {
    if !super::prepare(items, path, "json")? {
        return Ok(());
    }

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, items).context("writing json array")?;
    w.flush()?;

    tracing::info!(path = %path.display(), count = items.len(), "JSON export complete");
    Ok(())
}
