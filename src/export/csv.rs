// src/export/csv.rs
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;

use crate::record::CanonicalRecord;

/// CSV with a sorted union-of-keys header; nested values JSON-encoded per cell.
pub fn export_csv(items: &[CanonicalRecord], path: &Path) -> Result<()> {
    if !super::prepare(items, path, "csv")? {
        return Ok(());
    }

    let rows = items
        .iter()
        .map(super::record_map)
        .collect::<Result<Vec<_>>>()?;
    let header: Vec<&str> = rows
        .iter()
        .flat_map(|r| r.keys().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(&header)?;
    for row in &rows {
        writer.write_record(
            header
                .iter()
                .map(|k| row.get(*k).map(super::cell_text).unwrap_or_default()),
        )?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), count = items.len(), "CSV export complete");
    Ok(())
}
