// src/export/excel.rs
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use serde_json::Value;
use std::path::Path;

use crate::record::CanonicalRecord;

/// Excel's per-cell text limit.
const MAX_CELL_CHARS: usize = 32_767;

/// Single-sheet XLSX workbook; header row in schema order.
pub fn export_excel(items: &[CanonicalRecord], path: &Path) -> Result<()> {
    if !super::prepare(items, path, "excel")? {
        return Ok(());
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("news")?;

    let bold = Format::new().set_bold();
    for (col, name) in CanonicalRecord::FIELDS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &bold)?;
    }

    for (i, item) in items.iter().enumerate() {
        let row = (i + 1) as u32;
        let map = super::record_map(item)?;
        for (col, name) in CanonicalRecord::FIELDS.iter().enumerate() {
            let col = col as u16;
            match map.get(*name) {
                None | Some(Value::Null) => {}
                Some(Value::Number(n)) => match n.as_f64() {
                    Some(f) => {
                        sheet.write_number(row, col, f)?;
                    }
                    None => {
                        sheet.write_string(row, col, n.to_string())?;
                    }
                },
                Some(Value::Bool(b)) => {
                    sheet.write_boolean(row, col, *b)?;
                }
                Some(other) => {
                    let text: String = super::cell_text(other).chars().take(MAX_CELL_CHARS).collect();
                    sheet.write_string(row, col, text)?;
                }
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("saving workbook {}", path.display()))?;

    tracing::info!(path = %path.display(), count = items.len(), "Excel export complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::record::RawRecord;
    use serde_json::json;

    #[test]
    fn writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xl/out.xlsx");
        let raw = json!({"id": "1", "title": "t", "urgency": 4, "relatedSymbols": ["A"]});
        let rec = normalize(&RawRecord::from_value(&raw).unwrap());

        export_excel(&[rec], &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn empty_batch_creates_no_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        export_excel(&[], &path).unwrap();
        assert!(!path.exists());
    }
}
