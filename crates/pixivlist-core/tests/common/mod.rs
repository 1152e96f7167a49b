//! Shared helpers for list file integration tests.

use std::io::Write;
use tempfile::NamedTempFile;

/// Writes `contents` to a fresh temporary list file.
pub fn write_list(contents: &[u8]) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(contents).unwrap();
    f.flush().unwrap();
    f
}
