use super::reader::column_index_to_letter;
use super::types::*;

/// Read the column names from row 0 of a worksheet.
///
/// Every header cell must hold text; the first cell of any other type aborts
/// with [`ConvertError::NonTextHeader`]. A sheet without rows has no columns.
pub fn extract_header(sheet: &Worksheet) -> Result<Vec<String>, ConvertError> {
    sheet
        .header_row()
        .iter()
        .enumerate()
        .map(|(col_idx, cell)| match cell {
            CellValue::String(name) => Ok(name.clone()),
            other => Err(ConvertError::NonTextHeader {
                sheet: sheet.name.clone(),
                column: column_index_to_letter(col_idx),
                found: other.type_name(),
            }),
        })
        .collect()
}
