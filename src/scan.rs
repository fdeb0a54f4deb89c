//! Directory scanner
//!
//! Recursively enumerates every source file of the recognized extension
//! beneath a root directory, returning `/`-separated paths relative to that
//! root. These relative paths are the public identifiers the HTTP layer and
//! the browser UI use to refer to files, so the scanner and the resolver
//! must agree on them.
//!
//! Enumeration is all-or-nothing: a single unreadable subdirectory aborts
//! the whole listing rather than silently dropping part of the tree. The
//! walk does not follow symlinks, and anything that is not a regular file
//! or directory is skipped.

use crate::error::{ViewerError, ViewerResult};
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Enumerate all files under `root` whose extension matches `extension`
/// (compared without the dot, ASCII case-insensitively).
///
/// The result is unordered; callers that need determinism sort it.
pub fn enumerate(root: impl AsRef<Path>, extension: &str) -> ViewerResult<Vec<String>> {
    let root = root.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if !matches {
            continue;
        }

        // strip_prefix cannot fail: the walk started at root
        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| {
                ViewerError::access(
                    entry.path().display().to_string(),
                    io::Error::new(io::ErrorKind::InvalidData, e.to_string()),
                )
            })?;
        files.push(to_relative_string(rel));
    }

    Ok(files)
}

/// Render a relative path with `/` separators regardless of platform.
fn to_relative_string(rel: &Path) -> String {
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}

fn walk_error(root: &Path, err: walkdir::Error) -> ViewerError {
    let shown = err
        .path()
        .and_then(|p| p.strip_prefix(root).ok())
        .map(to_relative_string)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| root.display().to_string());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop"));
    ViewerError::access(shown, source)
}
