use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use chrono::{NaiveDate, TimeDelta};
use std::path::Path;
use tracing::debug;

use super::types::*;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Open a workbook and load all of its worksheets in workbook order
pub fn open_workbook(path: &Path) -> Result<Vec<Worksheet>, ConvertError> {
    // Format is picked from the file extension (xls, xlsx, xlsm, xlsb, ods)
    let mut workbook: Sheets<_> = open_workbook_auto(path).map_err(|e| ConvertError::OpenWorkbook {
        path: path.to_path_buf(),
        source: e,
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| ConvertError::ReadSheet {
                path: path.to_path_buf(),
                sheet: name.clone(),
                source: e,
            })?;

        let rows = range_to_rows(&range);
        debug!(sheet = %name, rows = rows.len(), "loaded worksheet");
        sheets.push(Worksheet::new(name, rows));
    }

    Ok(sheets)
}

/// Materialize a range as a grid anchored at A1.
///
/// calamine trims leading empty rows and columns from a range; they are put
/// back as `Empty` cells so row 0 is always the sheet's first row.
pub fn range_to_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((end_row, end_col)) = range.end() else {
        return Vec::new();
    };
    if range.is_empty() {
        return Vec::new();
    }

    (0..=end_row)
        .map(|row_idx| {
            (0..=end_col)
                .map(|col_idx| convert_cell_value(range.get_value((row_idx, col_idx))))
                .collect()
        })
        .collect()
}

/// Convert calamine Data to our CellValue
pub fn convert_cell_value(cell: Option<&Data>) -> CellValue {
    match cell {
        None => CellValue::Empty,
        Some(data) => match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::String(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Boolean(*b),
            Data::DateTime(dt) => {
                let serial = dt.as_f64();
                match format_excel_datetime(serial) {
                    Some(iso) => CellValue::DateTime(iso),
                    None => CellValue::Number(serial),
                }
            }
            Data::DateTimeIso(s) => CellValue::DateTime(s.clone()),
            Data::DurationIso(s) => CellValue::String(s.clone()),
            Data::Error(e) => CellValue::Error(e.to_string()),
        },
    }
}

/// Format Excel datetime (days since 1899-12-30) to ISO 8601
pub fn format_excel_datetime(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    // Excel epoch is December 30, 1899
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let offset = TimeDelta::try_seconds((value * SECONDS_PER_DAY).round() as i64)?;
    let datetime = epoch.checked_add_signed(offset)?;

    Some(datetime.format("%Y-%m-%dT%H:%M:%S").to_string())
}

/// Convert column index (0-based) to Excel column letter (A, B, ..., Z, AA, AB, ...)
pub fn column_index_to_letter(index: usize) -> String {
    let mut result = String::new();
    let mut n = index + 1;

    while n > 0 {
        n -= 1;
        let c = (b'A' + (n % 26) as u8) as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}
