//! Cloneview - Local web viewer for code clone detection reports
//!
//! Cloneview serves the output of an upstream clone-detection run - treemap
//! data, bar-chart data, clone-class listings, summary statistics - together
//! with the implicated source files, to a small browser UI that highlights
//! duplicated line ranges.
//!
//! # Overview
//!
//! The upstream detector writes JSON artifacts into a data directory.
//! Cloneview never interprets them: they pass through verbatim. What the
//! crate actually implements is the filesystem edge between a browser and a
//! source tree:
//!
//! 1. **Scanning** ([`scan`]): enumerate every source file of the recognized
//!    extension under the configured root, as root-relative paths.
//! 2. **Resolution** ([`resolve`]): map an untrusted relative path from a
//!    request back to a file, refusing anything that would land outside the
//!    root (`..` traversal, absolute paths, symlinks out of the tree).
//!
//! # Quick Start
//!
//! ```no_run
//! use cloneview::{scan, resolve, Config};
//!
//! let config = Config::for_root("./my-project/src")?;
//!
//! for rel in scan::enumerate(&config.source_directory, &config.source_extension)? {
//!     let text = resolve::resolve_and_read(&config.source_directory, &rel)?;
//!     println!("{}: {} bytes", rel, text.len());
//! }
//! # Ok::<(), cloneview::ViewerError>(())
//! ```
//!
//! # Modules
//!
//! - [`config`]: immutable startup configuration (`config.json`)
//! - [`scan`]: recursive source-file enumeration
//! - [`resolve`]: contained path resolution and file reading
//! - [`serve`]: the HTTP server and embedded UI

pub mod config;
pub mod error;
pub mod resolve;
pub mod scan;
pub mod serve;

pub use config::Config;
pub use error::{ViewerError, ViewerResult};
