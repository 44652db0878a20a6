use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::PathBuf;
use thiserror::Error;

/// Largest magnitude at which every integer is exactly representable in an f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Represents a cell value with type information
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    String(String),
    Number(f64),
    Boolean(bool),
    DateTime(String), // ISO 8601 format
    Error(String),    // Excel literal, e.g. "#DIV/0!"
}

impl CellValue {
    /// Short type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::String(_) => "string",
            CellValue::Number(_) => "number",
            CellValue::Boolean(_) => "boolean",
            CellValue::DateTime(_) => "date",
            CellValue::Error(_) => "error",
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_unit(),
            CellValue::String(s) => serializer.serialize_str(s),
            CellValue::Number(n) => serialize_number(*n, serializer),
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
            CellValue::DateTime(dt) => serializer.serialize_str(dt),
            CellValue::Error(e) => serializer.serialize_str(e),
        }
    }
}

/// Spreadsheets store every number as a double; whole numbers are written
/// as JSON integers so `1` does not turn into `1.0`.
fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !n.is_finite() {
        return serializer.serialize_unit();
    }

    if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}

/// A single worksheet, addressed from A1
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Worksheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Worksheet {
            name: name.into(),
            rows,
        }
    }

    /// Row 0, reserved for column names
    pub fn header_row(&self) -> &[CellValue] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every row after the header
    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

/// One converted row: column name to cell value, in header order.
///
/// Inserting a name that is already present replaces its value but keeps the
/// original position, so a repeated header column silently wins over the
/// earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, name: &str, value: CellValue) {
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Errors raised while converting workbooks
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to open workbook '{}': {source}", path.display())]
    OpenWorkbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Failed to read worksheet '{sheet}' in '{}': {source}", path.display())]
    ReadSheet {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error(
        "Only 'text' data types for column names is currently supported \
         (worksheet '{sheet}', column {column} holds a {found} value)"
    )]
    NonTextHeader {
        sheet: String,
        column: String,
        found: &'static str,
    },

    #[error("Worksheet name '{sheet}' cannot be used as a file name")]
    UnsafeSheetName { sheet: String },

    #[error("Failed to serialize worksheet '{sheet}': {source}")]
    Serialize {
        sheet: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        1
    }
}
