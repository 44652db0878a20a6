use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};

use super::types::*;

/// Indentation unit for pretty output
pub const INDENT: &[u8] = b"    ";

/// Layout of the generated JSON text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    Compact,
    Pretty,
}

/// Serialize records as a JSON array of objects.
///
/// Text is written as UTF-8; serde_json only escapes control characters,
/// quotes and backslashes, never non-ASCII characters.
pub fn to_json(sheet: &str, records: &[Record], style: JsonStyle) -> Result<String, ConvertError> {
    let bytes = match style {
        JsonStyle::Compact => write_with(records, CompactFormatter),
        JsonStyle::Pretty => write_with(records, PrettyFormatter::with_indent(INDENT)),
    }
    .map_err(|e| ConvertError::Serialize {
        sheet: sheet.to_string(),
        source: e,
    })?;

    // serde_json only ever emits valid UTF-8
    String::from_utf8(bytes).map_err(|e| ConvertError::Serialize {
        sheet: sheet.to_string(),
        source: serde::ser::Error::custom(e),
    })
}

fn write_with<F: Formatter>(records: &[Record], formatter: F) -> Result<Vec<u8>, serde_json::Error> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    Ok(buffer)
}
