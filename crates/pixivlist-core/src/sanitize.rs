//! Filesystem-safe sanitization of destination paths.
//!
//! Works component by component on the host separator, so callers can pass a
//! whole absolute path. A root directory, when given, is trusted and kept as-is.

use std::path::{MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

/// Longest component we emit, in bytes (Linux NAME_MAX).
const NAME_MAX: usize = 255;

/// Characters that are illegal in a path component on at least one of the
/// filesystems lists are commonly saved to (ext4, NTFS, exFAT).
fn is_illegal(c: char) -> bool {
    matches!(c, '\0' | '?' | ':' | '<' | '>' | '|' | '*' | '"') || c.is_control()
}

/// Sanitizes a single path component.
///
/// - Replaces illegal and control characters with `_`
/// - Trims leading spaces, trailing spaces and trailing dots
/// - Limits length to 255 bytes
fn sanitize_component(component: &str) -> String {
    let replaced: String = component
        .chars()
        .map(|c| if is_illegal(c) { '_' } else { c })
        .collect();

    let mut out = replaced.trim_start_matches(' ').trim_end_matches([' ', '.']);
    if out.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !out.is_char_boundary(take) {
            take -= 1;
        }
        out = out[..take].trim_end_matches([' ', '.']);
    }
    out.to_string()
}

/// Sanitizes every component of a separator-delimited path and drops the
/// components that end up empty.
fn sanitize_components(path: &str) -> String {
    path.split(MAIN_SEPARATOR)
        .map(sanitize_component)
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(MAIN_SEPARATOR_STR)
}

/// Returns a filesystem-safe equivalent of `path`.
///
/// If `root` is given and `path` lies under it, the root prefix is kept
/// verbatim and only the part below it is sanitized. A leading separator is
/// preserved so absolute paths stay absolute.
pub fn sanitize_path(path: &str, root: Option<&str>) -> String {
    let root = root
        .map(|r| r.trim_end_matches(MAIN_SEPARATOR))
        .filter(|r| !r.is_empty());

    if let Some(root) = root {
        if let Some(rest) = path.strip_prefix(root) {
            if rest.is_empty() {
                return root.to_string();
            }
            if rest.starts_with(MAIN_SEPARATOR) {
                let below = sanitize_components(rest);
                if below.is_empty() {
                    return root.to_string();
                }
                return format!("{root}{MAIN_SEPARATOR}{below}");
            }
        }
    }

    let body = sanitize_components(path);
    if path.starts_with(MAIN_SEPARATOR) {
        format!("{MAIN_SEPARATOR}{body}")
    } else {
        body
    }
}
