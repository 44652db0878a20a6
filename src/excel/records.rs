use std::collections::HashSet;
use tracing::warn;

use super::types::*;

/// Build one record per data row, fields in header order.
///
/// Cells missing from a short row are `Empty`; cells past the last header
/// column are ignored.
pub fn build_records(sheet: &Worksheet, header: &[String]) -> Vec<Record> {
    warn_duplicate_columns(&sheet.name, header);

    sheet
        .data_rows()
        .iter()
        .map(|row| {
            let mut record = Record::with_capacity(header.len());
            for (col_idx, name) in header.iter().enumerate() {
                let value = row.get(col_idx).cloned().unwrap_or_default();
                record.insert(name, value);
            }
            record
        })
        .collect()
}

fn warn_duplicate_columns(sheet: &str, header: &[String]) {
    let mut seen = HashSet::new();
    for name in header {
        if !seen.insert(name.as_str()) {
            warn!(sheet, column = %name, "duplicate column name, later values overwrite earlier ones");
        }
    }
}
