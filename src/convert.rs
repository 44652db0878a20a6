//! Run orchestration: workbooks in argument order, worksheets in workbook order.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::ConvertConfig;
use crate::excel::{
    build_records, check_sheet_name, extract_header, open_workbook, write_sheet, ConvertError, Record,
};

/// Progress notifications emitted during a run
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Workbook { path: PathBuf, sheet_count: usize },
    Worksheet { name: String },
    FileWritten { path: PathBuf, records: usize },
}

/// Records of one worksheet, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct SheetExport {
    pub name: String,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub workbooks: usize,
    pub worksheets: usize,
    pub files: Vec<PathBuf>,
}

/// Open one workbook and convert each of its worksheets into records
pub fn convert_workbook(
    path: &Path,
    progress: &mut impl FnMut(ProgressEvent),
) -> Result<Vec<SheetExport>, ConvertError> {
    let sheets = open_workbook(path)?;
    progress(ProgressEvent::Workbook {
        path: path.to_path_buf(),
        sheet_count: sheets.len(),
    });

    let mut exports = Vec::with_capacity(sheets.len());
    for sheet in &sheets {
        progress(ProgressEvent::Worksheet {
            name: sheet.name.clone(),
        });

        check_sheet_name(&sheet.name)?;
        let header = extract_header(sheet)?;
        let records = build_records(sheet, &header);
        debug!(sheet = %sheet.name, columns = header.len(), records = records.len(), "built records");

        exports.push(SheetExport {
            name: sheet.name.clone(),
            records,
        });
    }

    Ok(exports)
}

/// Convert every workbook and write its JSON files.
///
/// All workbooks are converted before the first file is written, so a
/// header violation anywhere leaves no output behind. Any error stops the run.
pub fn run(
    workbooks: &[PathBuf],
    config: &ConvertConfig,
    mut progress: impl FnMut(ProgressEvent),
) -> Result<RunSummary, ConvertError> {
    let mut exports = Vec::new();
    for path in workbooks {
        exports.extend(convert_workbook(path, &mut progress)?);
    }

    let mut summary = RunSummary {
        workbooks: workbooks.len(),
        worksheets: exports.len(),
        files: Vec::new(),
    };

    for export in &exports {
        for file in write_sheet(&export.name, &export.records, config)? {
            progress(ProgressEvent::FileWritten {
                path: file.path.clone(),
                records: file.records,
            });
            summary.files.push(file.path);
        }
    }

    Ok(summary)
}
