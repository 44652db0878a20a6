//! Convert Excel workbooks into JSON files, one per worksheet.
//!
//! Row 1 of every worksheet names the columns; each following row becomes a
//! JSON object keyed by those names, in column order.

pub mod cli;
pub mod config;
pub mod console;
pub mod convert;
pub mod excel;

pub use config::{ConvertConfig, SplitLimit};
pub use convert::{convert_workbook, run, ProgressEvent, RunSummary, SheetExport};
pub use excel::{CellValue, ConvertError, JsonStyle, Record, Worksheet};
