//! File resolver
//!
//! Maps a caller-supplied relative path back to a concrete file under the
//! configured source root. The input is untrusted: it may be empty, contain
//! `..` segments, be absolute, or carry a leading copy of the source root's
//! own directory name (the browser UI sends both spellings).
//!
//! Resolution is contained: the candidate is first normalized lexically so a
//! traversal like `../../etc/passwd` is refused before any filesystem
//! access, then canonicalized so a symlink pointing outside the root is
//! refused as well. Only a canonical descendant of the canonical root is
//! ever read.

use crate::error::{ViewerError, ViewerResult};
use std::ffi::OsStr;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve `rel` to a canonical path inside `root`.
///
/// `root` must itself be canonical (the config guarantees this). The file
/// must exist; a missing file is reported as an access error, a path that
/// leaves the root as an escape.
pub fn resolve(root: &Path, rel: &str) -> ViewerResult<PathBuf> {
    let rel = rel.trim();
    if rel.is_empty() {
        return Err(ViewerError::MissingPath);
    }

    let mut not_found: Option<io::Error> = None;
    let mut saw_contained = false;

    for candidate in candidates(root, rel) {
        let joined = match lexical_join(root, &candidate) {
            Some(p) => p,
            None => continue, // lexical escape; maybe the other spelling works
        };
        saw_contained = true;

        match joined.canonicalize() {
            Ok(canonical) if canonical.starts_with(root) => return Ok(canonical),
            Ok(_) => {
                // exists but a symlink carried it out of the tree
                return Err(ViewerError::PathEscape { path: rel.to_string() });
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                not_found.get_or_insert(e);
            }
            Err(e) => return Err(ViewerError::access(rel, e)),
        }
    }

    if saw_contained {
        let source = not_found
            .unwrap_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"));
        Err(ViewerError::access(rel, source))
    } else {
        Err(ViewerError::PathEscape { path: rel.to_string() })
    }
}

/// Resolve `rel` under `root` and return the file's text content.
pub fn resolve_and_read(root: &Path, rel: &str) -> ViewerResult<String> {
    let path = resolve(root, rel)?;
    std::fs::read_to_string(&path).map_err(|e| ViewerError::access(rel.trim(), e))
}

/// Spellings to try, in priority order: the path as given, then with one
/// leading component equal to the root's own directory name stripped.
fn candidates(root: &Path, rel: &str) -> Vec<PathBuf> {
    let rel = PathBuf::from(rel);
    let mut out = vec![rel.clone()];

    if let Some(root_name) = root.file_name() {
        let mut comps = rel.components();
        if comps.next() == Some(Component::Normal(root_name)) {
            out.push(comps.as_path().to_path_buf());
        }
    }
    out
}

/// Join `rel` onto `root` resolving `.` and `..` without touching the
/// filesystem. `None` means the path climbed above the root, or was
/// absolute to begin with.
fn lexical_join(root: &Path, rel: &Path) -> Option<PathBuf> {
    let mut stack: Vec<&OsStr> = Vec::new();
    for comp in rel.components() {
        match comp {
            Component::Normal(part) => stack.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                stack.pop()?;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if stack.is_empty() {
        // resolved to the root itself, which is a directory, not a file
        return None;
    }
    let mut out = root.to_path_buf();
    for part in stack {
        out.push(part);
    }
    Some(out)
}
