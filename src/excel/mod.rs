//! Excel module for reading workbooks and turning worksheets into JSON files.
//!
//! This module provides:
//! - Reading workbooks into typed worksheet grids
//! - Header extraction and record building
//! - JSON serialization and chunked file output

pub mod types;
pub mod reader;
pub mod header;
pub mod records;
pub mod serializer;
pub mod writer;

// Re-export commonly used types and functions
pub use types::*;
pub use reader::{open_workbook, column_index_to_letter};
pub use header::extract_header;
pub use records::build_records;
pub use serializer::{to_json, JsonStyle};
pub use writer::{check_sheet_name, chunk_records, write_sheet, WrittenFile};
