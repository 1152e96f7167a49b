//! Error types for list file parsing.
//!
//! Three tiers: [`ListError`] is returned to the caller and means nothing was
//! read; [`LineError`] skips one line; [`ScanStop`] ends the scan early but keeps
//! what was already parsed.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal error raised before any line is read.
#[derive(Debug, Error)]
pub enum ListError {
    #[error("file doesn't exist or no permission to read: {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Diagnostic level a skipped line is reported at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Why a single manifest line produced no entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// Bare token or `id` query value is not a non-negative integer.
    #[error("invalid id: {token}")]
    InvalidId { token: String },

    /// Member URL without a usable `id` query parameter.
    #[error("cannot detect member id from url: {url}")]
    MissingMemberId { url: String },

    /// Artwork URL whose trailing segment is not an integer.
    #[error("unable to extract content id from url: {url}")]
    InvalidContentId { url: String },

    /// URL that is neither a member nor an artwork link.
    #[error("unsupported url detected: {url}")]
    UnsupportedUrl { url: String },
}

impl LineError {
    /// Malformed artwork links are tolerated as warnings; everything else is an error.
    pub fn severity(&self) -> Severity {
        match self {
            LineError::InvalidContentId { .. } => Severity::Warning,
            LineError::InvalidId { .. }
            | LineError::MissingMemberId { .. }
            | LineError::UnsupportedUrl { .. } => Severity::Error,
        }
    }

    /// The first column of the offending line.
    pub fn token(&self) -> &str {
        match self {
            LineError::InvalidId { token } => token,
            LineError::MissingMemberId { url }
            | LineError::InvalidContentId { url }
            | LineError::UnsupportedUrl { url } => url,
        }
    }
}

/// Failure of [`parse_line`](super::parse_line).
#[derive(Debug, Error)]
pub enum LineFailure {
    /// The line is malformed; skip it and keep going.
    #[error(transparent)]
    Skip(#[from] LineError),

    /// The destination path could not be made absolute.
    #[error("cannot resolve destination path: {0}")]
    Path(#[source] io::Error),
}

/// Condition that ended a scan before the end of the file.
#[derive(Debug, Error)]
pub enum ScanStop {
    /// Line is not valid UTF-8. `line` holds a lossy rendering for diagnostics.
    #[error("invalid value: {line} at line {line_no}, try to save the list in UTF-8")]
    Decode { line_no: usize, line: String },

    /// Reading from the underlying file failed.
    #[error("read error at line {line_no}: {source}")]
    Io {
        line_no: usize,
        #[source]
        source: io::Error,
    },

    /// Anything else that went wrong while processing a line.
    #[error("invalid value: {line} at line {line_no}: {source}")]
    Unexpected {
        line_no: usize,
        line: String,
        #[source]
        source: io::Error,
    },
}

impl ScanStop {
    pub fn line_no(&self) -> usize {
        match self {
            ScanStop::Decode { line_no, .. }
            | ScanStop::Io { line_no, .. }
            | ScanStop::Unexpected { line_no, .. } => *line_no,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_id_failures_are_warnings() {
        let err = LineError::InvalidContentId {
            url: "https://www.pixiv.net/artworks/abc".to_string(),
        };
        assert_eq!(err.severity(), Severity::Warning);
        assert_eq!(err.token(), "https://www.pixiv.net/artworks/abc");
    }

    #[test]
    fn other_line_failures_are_errors() {
        let errs = [
            LineError::InvalidId { token: "abc".to_string() },
            LineError::MissingMemberId { url: "http://x/member.php".to_string() },
            LineError::UnsupportedUrl { url: "http://x/y".to_string() },
        ];
        for err in errs {
            assert_eq!(err.severity(), Severity::Error, "{err}");
        }
    }

    #[test]
    fn decode_stop_message_names_line() {
        let stop = ScanStop::Decode {
            line_no: 7,
            line: "12\u{fffd}34".to_string(),
        };
        assert_eq!(stop.line_no(), 7);
        assert_eq!(
            stop.to_string(),
            "invalid value: 12\u{fffd}34 at line 7, try to save the list in UTF-8"
        );
    }
}
