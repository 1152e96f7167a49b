//! Normalization of the optional destination path column.

use path_clean::PathClean;
use std::io;
use std::path::{Path, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use crate::sanitize::sanitize_path;

/// Legacy marker for "no path", matched verbatim.
pub const NO_PATH_MARKER: &str = r"N\A";

/// Macro replaced with the caller's root directory.
pub const ROOT_MACRO: &str = "%root%";

/// Normalizes the raw path column of a manifest line.
///
/// Returns an empty string when there is no column or it holds [`NO_PATH_MARKER`].
/// Otherwise the value is unquoted, `%root%` is expanded (to nothing if
/// `root_dir` is `None`), the result is made absolute against the current
/// directory, sanitized and converted to the host separator.
///
/// Fails only if the current directory is needed and cannot be determined.
pub fn normalize_path(raw: Option<&str>, root_dir: Option<&str>) -> io::Result<String> {
    let Some(raw) = raw else {
        return Ok(String::new());
    };
    let trimmed = raw.trim();
    if trimmed == NO_PATH_MARKER {
        return Ok(String::new());
    }

    let expanded = trimmed
        .replace('"', "")
        .replace(ROOT_MACRO, root_dir.unwrap_or(""));
    let absolute = absolutize(&expanded)?;

    let sanitized = if has_drive_prefix(&absolute) {
        sanitize_drive_path(&absolute)
    } else {
        let root = root_dir.map(absolutize).transpose()?;
        sanitize_path(&absolute, root.as_deref())
    };

    Ok(to_native_separators(&sanitized))
}

/// Collapses `\\` to `\`, then turns every backslash into the host separator.
pub fn to_native_separators(path: &str) -> String {
    path.replace(r"\\", r"\").replace('\\', MAIN_SEPARATOR_STR)
}

/// True if `path` starts with a drive letter such as `C:`.
fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Sanitizes everything after the first separator, keeping the drive verbatim.
fn sanitize_drive_path(path: &str) -> String {
    match path.split_once(MAIN_SEPARATOR) {
        Some((drive, rest)) => format!("{drive}{MAIN_SEPARATOR}{}", sanitize_path(rest, None)),
        None => path.to_string(),
    }
}

/// Joins `raw` onto the current directory if relative and cleans `.` and `..`
/// lexically. Symlinks are not followed.
fn absolutize(raw: &str) -> io::Result<String> {
    let path = Path::new(raw);
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(joined.clean().to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_column_is_empty() {
        assert_eq!(normalize_path(None, Some("/home/u")).unwrap(), "");
    }

    #[test]
    fn legacy_marker_is_empty() {
        assert_eq!(normalize_path(Some(r"N\A"), None).unwrap(), "");
        assert_eq!(normalize_path(Some("  N\\A  "), Some("/x")).unwrap(), "");
    }

    #[test]
    fn drive_prefix_detection() {
        assert!(has_drive_prefix(r"C:\Users"));
        assert!(has_drive_prefix("d:"));
        assert!(!has_drive_prefix("/home/u"));
        assert!(!has_drive_prefix("1:"));
        assert!(!has_drive_prefix("C"));
    }

    #[cfg(unix)]
    mod unix {
        use super::super::*;

        #[test]
        fn root_macro_expands() {
            assert_eq!(
                normalize_path(Some("%root%/foo"), Some("/home/u")).unwrap(),
                "/home/u/foo"
            );
        }

        #[test]
        fn root_macro_without_root() {
            assert_eq!(normalize_path(Some("%root%/foo"), None).unwrap(), "/foo");
        }

        #[test]
        fn quotes_are_stripped() {
            assert_eq!(
                normalize_path(Some("\"/tmp/my dir\""), None).unwrap(),
                "/tmp/my dir"
            );
        }

        #[test]
        fn sanitizes_below_root_only() {
            assert_eq!(
                normalize_path(Some("%root%/a?b/c. "), Some("/srv/we:ird")).unwrap(),
                "/srv/we:ird/a_b/c"
            );
            assert_eq!(
                normalize_path(Some("/tmp/a?b"), Some("/srv")).unwrap(),
                "/tmp/a_b"
            );
        }

        #[test]
        fn dot_segments_resolve() {
            assert_eq!(
                normalize_path(Some("/tmp/a/./b/../c"), None).unwrap(),
                "/tmp/a/c"
            );
        }

        #[test]
        fn parent_segments_stop_at_root() {
            assert_eq!(
                normalize_path(Some("%root%/../../x"), Some("/a")).unwrap(),
                "/x"
            );
            assert_eq!(normalize_path(Some("/tmp/./a/.."), None).unwrap(), "/tmp");
        }

        #[test]
        fn relative_paths_join_current_dir() {
            let cwd = std::env::current_dir().unwrap();
            let expected = sanitize_path(&cwd.join("downloads").to_string_lossy(), None);
            assert_eq!(normalize_path(Some("downloads"), None).unwrap(), expected);
        }

        #[test]
        fn backslashes_become_native() {
            assert_eq!(
                normalize_path(Some(r"%root%\sub\\dir"), Some("/home/u")).unwrap(),
                "/home/u/sub/dir"
            );
        }

        #[test]
        fn native_separators() {
            assert_eq!(to_native_separators(r"a\\b\c"), "a/b/c");
            assert_eq!(to_native_separators("a/b"), "a/b");
        }

        #[test]
        fn drive_path_keeps_prefix() {
            assert_eq!(sanitize_drive_path("C:/Users/a?b/"), "C:/Users/a_b");
            assert_eq!(sanitize_drive_path("C:"), "C:");
        }
    }

    #[cfg(windows)]
    mod windows {
        use super::super::*;

        #[test]
        fn native_separators() {
            assert_eq!(to_native_separators(r"a\\b/c"), r"a\b/c");
        }

        #[test]
        fn drive_path_keeps_prefix() {
            assert_eq!(
                normalize_path(Some(r"C:\Users\a?b"), None).unwrap(),
                r"C:\Users\a_b"
            );
        }
    }
}
