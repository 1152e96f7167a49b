//! Manifest (`list.txt`) parsing.
//!
//! Each non-blank, non-comment line is `<token> [<path>]`: a member id, a
//! member/artwork URL, and an optional destination directory. Bad lines are
//! logged and skipped; an undecodable line ends the scan but keeps the entries
//! read so far. Only failing to open the file is an error for the caller.

mod classify;
mod error;
mod path;

pub use classify::{classify, classify_token, Target, TokenKind};
pub use error::{LineError, LineFailure, ListError, ScanStop, Severity};
pub use path::{normalize_path, to_native_separators, NO_PATH_MARKER, ROOT_MACRO};

use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Lines starting with this (after trimming) are ignored.
pub const COMMENT_MARKER: char = '#';

const UTF8_BOM: char = '\u{feff}';

/// One download target read from the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    id: u64,
    is_content_id: bool,
    path: String,
}

impl ListEntry {
    pub fn new(target: Target, path: String) -> Self {
        Self {
            id: target.id(),
            is_content_id: target.is_content(),
            path,
        }
    }

    /// Member id or content id, depending on [`is_content_id`](Self::is_content_id).
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_content_id(&self) -> bool {
        self.is_content_id
    }

    /// Normalized destination; empty means "use the default".
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn target(&self) -> Target {
        if self.is_content_id {
            Target::Content(self.id)
        } else {
            Target::Member(self.id)
        }
    }
}

impl fmt::Display for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(id:{}, path:'{}')", self.id, self.path)
    }
}

/// A line that produced no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based physical line number.
    pub line_no: usize,
    pub error: LineError,
}

/// Everything one scan produced.
#[derive(Debug, Default)]
pub struct ListReport {
    pub entries: Vec<ListEntry>,
    pub skipped: Vec<SkippedLine>,
    /// Set if the scan ended before the end of the input.
    pub stopped: Option<ScanStop>,
}

impl ListReport {
    /// True if every line was either accepted or ignored.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.stopped.is_none()
    }
}

/// Splits a trimmed line into its token and the rest of the line.
fn split_line(line: &str) -> (&str, Option<&str>) {
    match line.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, Some(rest.trim_start())),
        None => (line, None),
    }
}

/// Parses one line. `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str, root_dir: Option<&str>) -> Result<Option<ListEntry>, LineFailure> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_MARKER) {
        return Ok(None);
    }

    let (token, rest) = split_line(line);
    let target = classify(token)?;
    let path = normalize_path(rest, root_dir).map_err(LineFailure::Path)?;
    Ok(Some(ListEntry::new(target, path)))
}

/// Scans `reader` line by line. Never fails; problems end up in the report.
pub fn parse_reader<R: BufRead>(mut reader: R, root_dir: Option<&str>) -> ListReport {
    let mut report = ListReport::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => line_no += 1,
            Err(source) => {
                report.stopped = Some(ScanStop::Io {
                    line_no: line_no + 1,
                    source,
                });
                break;
            }
        }

        let Ok(text) = std::str::from_utf8(&buf) else {
            report.stopped = Some(ScanStop::Decode {
                line_no,
                line: String::from_utf8_lossy(&buf).trim_end().to_string(),
            });
            break;
        };
        let text = if line_no == 1 {
            text.trim_start_matches(UTF8_BOM)
        } else {
            text
        };

        match parse_line(text, root_dir) {
            Ok(Some(entry)) => {
                tracing::debug!("line {}: {}", line_no, entry);
                report.entries.push(entry);
            }
            Ok(None) => {}
            Err(LineFailure::Skip(error)) => {
                match error.severity() {
                    Severity::Warning => tracing::warn!("line {}: {}", line_no, error),
                    Severity::Error => tracing::error!("line {}: {}", line_no, error),
                }
                report.skipped.push(SkippedLine { line_no, error });
            }
            Err(LineFailure::Path(source)) => {
                report.stopped = Some(ScanStop::Unexpected {
                    line_no,
                    line: text.trim().to_string(),
                    source,
                });
                break;
            }
        }
    }

    if let Some(stop) = &report.stopped {
        tracing::error!("stopped reading list: {}", stop);
    }
    report
}

/// Opens `path` and scans it, returning entries and diagnostics.
pub fn parse_list_report(path: &Path, root_dir: Option<&str>) -> Result<ListReport, ListError> {
    let file = open_list(path)?;
    tracing::debug!("parsing list file {}", path.display());

    let report = parse_reader(BufReader::new(file), root_dir);
    tracing::info!(
        "parsed {} entries from {} ({} skipped)",
        report.entries.len(),
        path.display(),
        report.skipped.len()
    );
    Ok(report)
}

/// Opens `path` and returns every entry that parsed successfully, in file order.
///
/// Fails only if the file is missing or unreadable; see [`parse_list_report`]
/// for per-line diagnostics.
pub fn parse_list(path: &Path, root_dir: Option<&str>) -> Result<Vec<ListEntry>, ListError> {
    parse_list_report(path, root_dir).map(|report| report.entries)
}

fn open_list(path: &Path) -> Result<File, ListError> {
    let access = |source: io::Error| ListError::FileAccess {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(access)?;
    if file.metadata().map_err(access)?.is_dir() {
        return Err(access(io::Error::other("is a directory")));
    }
    Ok(file)
}
