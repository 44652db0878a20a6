use std::fs;
use std::path::PathBuf;
use tracing::debug;

use super::serializer::to_json;
use super::types::*;
use crate::config::{ConvertConfig, SplitLimit};

/// Partition records into consecutive chunks in row order.
///
/// Full chunks hold `limit - 1` records; whatever is left after the last full
/// chunk is returned as a final, shorter chunk. A limit of 1 yields a single
/// chunk holding every record.
pub fn chunk_records(records: &[Record], limit: SplitLimit) -> std::slice::Chunks<'_, Record> {
    records.chunks(limit.chunk_capacity().unwrap_or(usize::MAX))
}

/// A JSON file produced for a worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub records: usize,
}

/// Reject worksheet names that would not stay inside the output directory
/// once used as a file name stem.
pub fn check_sheet_name(sheet: &str) -> Result<(), ConvertError> {
    let unsafe_name = matches!(sheet, "" | "." | "..")
        || sheet.contains(|c: char| c == '/' || c == '\\' || c == '\0');

    if unsafe_name {
        return Err(ConvertError::UnsafeSheetName {
            sheet: sheet.to_string(),
        });
    }
    Ok(())
}

/// `<sheet>.json`
pub fn sheet_file_name(sheet: &str) -> String {
    format!("{}.json", sheet)
}

/// `<sheet>-<index>.json`, index starting at 1
pub fn chunk_file_name(sheet: &str, index: usize) -> String {
    format!("{}-{}.json", sheet, index)
}

/// Write the records of one worksheet and return the files written.
///
/// Existing files with the same name are overwritten.
pub fn write_sheet(
    sheet: &str,
    records: &[Record],
    config: &ConvertConfig,
) -> Result<Vec<WrittenFile>, ConvertError> {
    check_sheet_name(sheet)?;
    let dir = config.output_dir.as_path();

    match config.split {
        None => {
            let path = dir.join(sheet_file_name(sheet));
            Ok(vec![write_json_file(path, sheet, records, config)?])
        }
        Some(limit) => chunk_records(records, limit)
            .enumerate()
            .map(|(idx, chunk)| {
                let path = dir.join(chunk_file_name(sheet, idx + 1));
                write_json_file(path, sheet, chunk, config)
            })
            .collect(),
    }
}

fn write_json_file(
    path: PathBuf,
    sheet: &str,
    records: &[Record],
    config: &ConvertConfig,
) -> Result<WrittenFile, ConvertError> {
    let json = to_json(sheet, records, config.style)?;

    if let Err(e) = fs::write(&path, json) {
        return Err(ConvertError::Write { path, source: e });
    }

    debug!(path = %path.display(), records = records.len(), "wrote json file");
    Ok(WrittenFile {
        path,
        records: records.len(),
    })
}
