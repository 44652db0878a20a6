//! Command line surface.

use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use crate::config::{ConvertConfig, SplitLimit};
use crate::excel::JsonStyle;

pub const NOTHING_TO_PROCESS: &str = "No Excel workbooks were given to process, please try again \
     while supplying your .xls or .xlsx file(s) to parse";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "workbook-to-json")]
#[command(
    version,
    about = "Save every worksheet of Excel workbooks (.xls or .xlsx) as JSON files in the working directory"
)]
pub struct Args {
    /// Workbooks to convert (.xls, .xlsx, .xlsm, .xlsb or .ods)
    #[arg(value_name = "FILE", value_parser = existing_file)]
    pub workbooks: Vec<PathBuf>,

    /// Pretty-print the built JSON files (off by default to help save space,
    /// the generated JSON files are big)
    #[arg(short, long)]
    pub pretty: bool,

    /// Split up the generated JSON into multiple files named SHEET-1.json,
    /// SHEET-2.json, etc. A new file is started once N-1 records have been
    /// written to the current one; N=1 puts every record in SHEET-1.json
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u32).range((SplitLimit::MIN as i64)..))]
    pub split: Option<u32>,
}

fn existing_file(arg: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(arg);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("'{}' is not an existing workbook file", arg))
    }
}

impl Args {
    /// Build the immutable run configuration
    pub fn to_config(&self) -> ConvertConfig {
        ConvertConfig {
            style: if self.pretty { JsonStyle::Pretty } else { JsonStyle::Compact },
            split: self.split.and_then(SplitLimit::new),
            ..ConvertConfig::default()
        }
    }
}

/// Exit code for a failed parse: 0 when help or version was requested
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Long help text, as printed by `--help`
pub fn usage() -> String {
    Args::command().render_long_help().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("workbook-to-json").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_flags_build_config() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let args = parse(&["-p", "--split=1000", path]).unwrap();
        let config = args.to_config();
        assert_eq!(config.style, JsonStyle::Pretty);
        assert_eq!(config.split.map(SplitLimit::get), Some(1000));
        assert_eq!(args.workbooks, vec![PathBuf::from(path)]);

        let args = parse(&["-s", "3", path, "--pretty"]).unwrap();
        assert_eq!(args.split, Some(3));
        assert!(args.pretty);

        let args = parse(&["--split", "7", path]).unwrap();
        assert_eq!(args.split, Some(7));

        let args = parse(&["-s", "1", path]).unwrap();
        assert_eq!(args.to_config().split.map(SplitLimit::get), Some(1));
    }

    #[test]
    fn test_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let args = parse(&[file.path().to_str().unwrap()]).unwrap();
        assert_eq!(args.to_config(), ConvertConfig::default());
    }

    #[test]
    fn test_malformed_split_is_usage_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        for bad in [["--split=abc", path], ["-s", "0"], ["--split=-4", path], ["--split=2.5", path]] {
            let err = parse(&bad).unwrap_err();
            assert_eq!(parse_error_exit_code(&err), 1, "args: {:?}", bad);
        }
    }

    #[test]
    fn test_missing_file_is_usage_error() {
        let err = parse(&["definitely/not/here.xlsx"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_eq!(parse_error_exit_code(&err), 1);
    }

    #[test]
    fn test_unknown_flag_is_usage_error() {
        let err = parse(&["--frobnicate"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(parse_error_exit_code(&err), 1);
    }

    #[test]
    fn test_help_exits_zero() {
        let err = parse(&["-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse_error_exit_code(&err), 0);
    }

    #[test]
    fn test_flags_without_workbooks() {
        let args = parse(&["--pretty"]).unwrap();
        assert!(args.workbooks.is_empty());
        assert!(usage().contains("--split"));
    }
}
