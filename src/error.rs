//! Error types shared across the viewer
//!
//! The viewer distinguishes three failure classes at its API surface:
//!
//! - [`ViewerError::MissingPath`]: the caller omitted a required path
//!   parameter. No filesystem access was attempted.
//! - [`ViewerError::PathEscape`]: a relative path resolved outside the
//!   configured source root. The request is refused outright.
//! - [`ViewerError::Access`]: a filesystem operation failed (listing a
//!   directory, reading a file), wrapping the underlying io cause.
//!
//! `Access` errors carry the caller-supplied path, never the resolved
//! absolute path, so error bodies do not reveal the server's layout.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("no file path provided")]
    MissingPath,

    #[error("path escapes source root: {path}")]
    PathEscape { path: String },

    #[error("failed to access {path}: {source}")]
    Access {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl ViewerError {
    pub fn access(path: impl Into<String>, source: io::Error) -> Self {
        Self::Access { path: path.into(), source }
    }

    /// HTTP status the request layer reports this error as.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingPath => 400,
            Self::PathEscape { .. } => 403,
            Self::Access { .. } | Self::Config { .. } => 500,
        }
    }
}

pub type ViewerResult<T> = std::result::Result<T, ViewerError>;
