//! Run configuration, built once from the command line and then read-only.

use std::path::PathBuf;

use crate::excel::JsonStyle;

/// Split limit `N` for chunked output.
///
/// A chunk is flushed when the 1-based running counter of its buffer reaches
/// `N`, so every full chunk holds `N - 1` records. With `N = 1` the counter
/// never matches and the whole sheet ends up in a single chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLimit(u32);

impl SplitLimit {
    pub const MIN: u32 = 1;

    pub fn new(limit: u32) -> Option<Self> {
        (limit >= Self::MIN).then_some(SplitLimit(limit))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of records in each full chunk, `None` when chunks are unbounded
    pub fn chunk_capacity(self) -> Option<usize> {
        match self.0 {
            1 => None,
            n => Some((n - 1) as usize),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub style: JsonStyle,
    pub split: Option<SplitLimit>,
    /// Directory the JSON files are written to
    pub output_dir: PathBuf,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            style: JsonStyle::Compact,
            split: None,
            output_dir: PathBuf::from("."),
        }
    }
}
