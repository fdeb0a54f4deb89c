//! Viewer configuration
//!
//! Read once from a `config.json` at startup and never mutated afterwards.
//! The file uses camelCase keys, matching the artifact format the upstream
//! clone detector writes alongside its JSON reports:
//!
//! ```json
//! {
//!     "sourceDirectory": "sample-project/src",
//!     "port": 3000,
//!     "dataDirectory": "visualization"
//! }
//! ```
//!
//! Relative `sourceDirectory` / `dataDirectory` values are interpreted
//! relative to the directory containing the config file. The source root is
//! canonicalized here so the resolver's containment check has a stable base.

use crate::error::{ViewerError, ViewerResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_DIR: &str = "visualization";
pub const DEFAULT_EXTENSION: &str = "java";

/// On-disk shape of `config.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    source_directory: PathBuf,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    data_directory: Option<PathBuf>,
    #[serde(default)]
    source_extension: Option<String>,
}

/// Immutable viewer configuration, constructed once at process entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Canonical absolute path to the source tree being viewed.
    pub source_directory: PathBuf,
    /// Directory holding the precomputed JSON artifacts.
    pub data_directory: PathBuf,
    /// Port the viewer listens on.
    pub port: u16,
    /// File extension (without dot) recognized as source, compared
    /// case-insensitively.
    pub source_extension: String,
}

impl Config {
    /// Build a config directly from a source root, using defaults elsewhere.
    pub fn for_root(root: impl AsRef<Path>) -> ViewerResult<Self> {
        let root = root.as_ref();
        let source_directory = root.canonicalize().map_err(|e| {
            ViewerError::access(root.display().to_string(), e)
        })?;
        Ok(Self {
            source_directory,
            data_directory: PathBuf::from(DEFAULT_DATA_DIR),
            port: DEFAULT_PORT,
            source_extension: DEFAULT_EXTENSION.to_string(),
        })
    }

    /// Load `config.json`, resolving relative paths against its directory.
    pub fn load(path: impl AsRef<Path>) -> ViewerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ViewerError::access(path.display().to_string(), e))?;
        let file: ConfigFile = serde_json::from_str(&text).map_err(|e| ViewerError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let root = base.join(&file.source_directory);
        let source_directory = root.canonicalize().map_err(|e| {
            ViewerError::access(root.display().to_string(), e)
        })?;
        let data_directory = base.join(
            file.data_directory
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        );

        Ok(Self {
            source_directory,
            data_directory,
            port: file.port.unwrap_or(DEFAULT_PORT),
            source_extension: file
                .source_extension
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ==========================================================================
    // CONFIG LOADING TESTS
    // ==========================================================================
    //
    // The config is the only startup input; everything downstream trusts its
    // canonical source root. These tests cover the file format, the relative
    // path handling, and the startup failure modes.
    // ==========================================================================

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_minimal_config() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        let path = write_config(&dir, r#"{"sourceDirectory": "src"}"#);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.source_directory, dir.path().join("src").canonicalize().unwrap());
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.source_extension, "java");
        assert!(config.data_directory.ends_with(DEFAULT_DATA_DIR));
    }

    #[test]
    fn test_load_full_config() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("proj")).unwrap();
        let path = write_config(
            &dir,
            r#"{
                "sourceDirectory": "proj",
                "port": 8123,
                "dataDirectory": "artifacts",
                "sourceExtension": "kt"
            }"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.port, 8123);
        assert_eq!(config.source_extension, "kt");
        assert_eq!(config.data_directory, dir.path().join("artifacts"));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{not json");

        match Config::load(&path) {
            Err(ViewerError::Config { .. }) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_missing_source_directory() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"sourceDirectory": "does-not-exist"}"#);

        match Config::load(&path) {
            Err(ViewerError::Access { .. }) => {}
            other => panic!("expected Access error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nope.json"));
        assert!(matches!(result, Err(ViewerError::Access { .. })));
    }

    #[test]
    fn test_for_root_canonicalizes() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        // A dot segment should disappear after canonicalization
        let config = Config::for_root(dir.path().join("a").join(".")).unwrap();
        assert_eq!(config.source_directory, dir.path().join("a").canonicalize().unwrap());
    }

    #[test]
    fn test_config_serializes_camel_case() {
        let dir = TempDir::new().unwrap();
        let config = Config::for_root(dir.path()).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("sourceDirectory"));
        assert!(json.contains("dataDirectory"));
        assert!(json.contains("sourceExtension"));
    }
}
