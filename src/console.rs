//! Terminal output: colours, word wrapping to the terminal width, banners.

use regex::Regex;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::OnceLock;
use terminal_size::{terminal_size, Width};

use crate::convert::ProgressEvent;

/// One level of indentation
pub const TAB: &str = "    ";

const DEFAULT_WIDTH: usize = 80;

// CSI sequences and OSC sequences terminated by ST or BEL
const ANSI_PATTERN: &str = r"\x1b\[.*?[@-~]|\x1b\].*?(?:\x1b\\|\x07)";

pub mod colors {
    pub const HEADER: &str = "\x1b[95m";
    pub const OK_BLUE: &str = "\x1b[1;94m";
    pub const OK_GREEN: &str = "\x1b[92m";
    pub const FAIL: &str = "\x1b[91m";
    pub const END: &str = "\x1b[0m";
}

fn ansi_regex() -> Option<&'static Regex> {
    static ANSI: OnceLock<Option<Regex>> = OnceLock::new();
    ANSI.get_or_init(|| Regex::new(ANSI_PATTERN).ok()).as_ref()
}

/// Remove ANSI escape sequences
pub fn strip_ansi(text: &str) -> std::borrow::Cow<'_, str> {
    match ansi_regex() {
        Some(re) => re.replace_all(text, ""),
        None => std::borrow::Cow::Borrowed(text),
    }
}

/// Printed width of `text`, escape sequences excluded
pub fn visible_len(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

/// Word-wrap `message` to `max_width` columns, starting every line with
/// `indent`. A word longer than the line is kept whole.
pub fn wrap(indent: &str, message: &str, max_width: usize) -> String {
    let indent_len = visible_len(indent);
    let mut out = String::from(indent);
    let mut line_width = indent_len;

    for word in message.split(' ') {
        let word_len = visible_len(word);
        let at_line_start = line_width == indent_len;
        let needed = if at_line_start { word_len } else { word_len + 1 };

        if !at_line_start && line_width + needed > max_width {
            out.push('\n');
            out.push_str(indent);
            out.push_str(word);
            line_width = indent_len + word_len;
        } else {
            if !at_line_start {
                out.push(' ');
            }
            out.push_str(word);
            line_width += needed;
        }
    }

    out
}

/// Width of the attached terminal, then `COLUMNS`, then 80
pub fn terminal_width() -> usize {
    let detected = terminal_size().map(|(Width(w), _)| usize::from(w));
    resolve_width(detected, std::env::var("COLUMNS").ok().as_deref())
}

fn resolve_width(detected: Option<usize>, columns: Option<&str>) -> usize {
    detected
        .filter(|w| *w > 0)
        .or_else(|| columns.and_then(|v| v.trim().parse::<usize>().ok()).filter(|w| *w > 0))
        .unwrap_or(DEFAULT_WIDTH)
}

fn paint_if(enabled: bool, color: &str, text: &str) -> String {
    if enabled {
        format!("{}{}{}", color, text, colors::END)
    } else {
        text.to_string()
    }
}

/// Writer for user-facing output
#[derive(Debug, Clone, Copy)]
pub struct Console {
    stdout_color: bool,
    stderr_color: bool,
    width: usize,
}

impl Console {
    pub fn new(stdout_color: bool, stderr_color: bool, width: usize) -> Self {
        Console {
            stdout_color,
            stderr_color,
            width,
        }
    }

    /// Colour each stream only when it is a terminal and `NO_COLOR` is unset
    pub fn detect() -> Self {
        let allowed = std::env::var_os("NO_COLOR").is_none();
        Console::new(
            allowed && std::io::stdout().is_terminal(),
            allowed && std::io::stderr().is_terminal(),
            terminal_width(),
        )
    }

    /// Colour text bound for stdout
    pub fn paint(&self, color: &str, text: &str) -> String {
        paint_if(self.stdout_color, color, text)
    }

    fn error_line(&self, message: &str) -> String {
        paint_if(self.stderr_color, colors::FAIL, &format!("ERROR: {}", message))
    }

    pub fn smart_print(&self, indent: &str, message: &str) {
        println!("{}", wrap(indent, message, self.width));
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{}", self.error_line(message));
    }

    pub fn print_success(&self, message: &str) {
        println!("{}", self.paint(colors::OK_GREEN, message));
    }

    /// Report a progress event from a conversion run
    pub fn progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Workbook { path, sheet_count } => {
                println!("{}", workbook_line(path, *sheet_count));
            }
            ProgressEvent::Worksheet { name } => {
                self.smart_print(TAB, &format!("Processing worksheet '{}'...", name));
            }
            ProgressEvent::FileWritten { path, records } => {
                let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                let file = self.paint(colors::HEADER, &name);
                self.smart_print(TAB, &format!("Wrote {} ({} {})", file, records, plural(*records, "record")));
            }
        }
    }
}

fn workbook_line(path: &Path, sheet_count: usize) -> String {
    format!(
        "Parsing workbook '{}' with {} {}",
        path.display(),
        sheet_count,
        plural(sheet_count, "worksheet")
    )
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi() {
        let colored = format!("{}-p{}, {}--pretty{}", colors::OK_BLUE, colors::END, colors::OK_BLUE, colors::END);
        assert_eq!(strip_ansi(&colored), "-p, --pretty");
        assert_eq!(strip_ansi("\x1b]0;title\x07plain"), "plain");
        assert_eq!(visible_len(&format!("{}ümlaut{}", colors::FAIL, colors::END)), 6);
    }

    #[test]
    fn test_wrap_breaks_at_width() {
        assert_eq!(wrap(TAB, "aaa bbb ccc", 12), "    aaa bbb\n    ccc");
        assert_eq!(wrap("", "short line", 80), "short line");
    }

    #[test]
    fn test_wrap_ignores_escape_codes_when_measuring() {
        let word = format!("{}abc{}", colors::HEADER, colors::END);
        let message = format!("{} {}", word, word);
        assert_eq!(wrap("", &message, 7), message);
    }

    #[test]
    fn test_wrap_keeps_long_word_whole() {
        assert_eq!(wrap(TAB, "averyveryverylongword x", 10), "    averyveryverylongword\n    x");
    }

    #[test]
    fn test_paint_without_color() {
        let console = Console::new(false, false, 80);
        assert_eq!(console.paint(colors::FAIL, "boom"), "boom");

        let console = Console::new(true, false, 80);
        assert_eq!(console.paint(colors::FAIL, "boom"), "\x1b[91mboom\x1b[0m");
    }

    #[test]
    fn test_error_color_follows_stderr() {
        // stdout redirected, stderr still a terminal
        let console = Console::new(false, true, 80);
        assert_eq!(console.error_line("bad header"), "\x1b[91mERROR: bad header\x1b[0m");
        assert_eq!(console.paint(colors::OK_GREEN, "done"), "done");

        // stderr redirected to a log file
        let console = Console::new(true, false, 80);
        assert_eq!(console.error_line("bad header"), "ERROR: bad header");
    }

    #[test]
    fn test_resolve_width_order() {
        // The terminal wins over COLUMNS
        assert_eq!(resolve_width(Some(40), Some("120")), 40);
        // COLUMNS is used when no terminal answers
        assert_eq!(resolve_width(None, Some(" 120 ")), 120);
        // Nothing usable falls back to 80
        assert_eq!(resolve_width(None, Some("wide")), 80);
        assert_eq!(resolve_width(None, None), 80);
        assert_eq!(resolve_width(Some(0), Some("0")), 80);
    }

    #[test]
    fn test_workbook_line_pluralization() {
        assert_eq!(
            workbook_line(Path::new("book.xlsx"), 1),
            "Parsing workbook 'book.xlsx' with 1 worksheet"
        );
        assert_eq!(
            workbook_line(Path::new("book.xls"), 3),
            "Parsing workbook 'book.xls' with 3 worksheets"
        );
    }
}
