//! HTTP server for the viewer
//!
//! `cloneview serve` → starts the server, opens the browser, serves the
//! embedded UI plus a small JSON API:
//!
//! - `/api/files` — enumerated source files (relative paths)
//! - `/api/file?path=…` — raw text of one source file
//! - `/api/config` — the active configuration
//! - `/api/stats`, `/api/barChartData`, `/api/treemapData`,
//!   `/api/cloneClassData` — precomputed artifacts served verbatim from the
//!   data directory, re-read on every request and marked uncacheable so a
//!   re-run of the upstream detector shows up on refresh.

use crate::config::Config;
use crate::error::ViewerError;
use crate::{resolve, scan};
use log::{debug, warn};
use serde::Deserialize;
use tiny_http::{Header, Method, Request, Response, Server};

// Embed the UI directly in the binary
const UI_HTML: &str = include_str!("ui.html");

/// Artifact endpoints: URL path → file stem in the data directory.
const ARTIFACTS: &[&str] = &["stats", "barChartData", "treemapData", "cloneClassData"];

#[derive(Deserialize, Debug)]
struct FileQuery {
    #[serde(default)]
    path: String,
}

/// A fully-formed response, kept inert so handlers stay testable.
struct Reply {
    status: u16,
    content_type: &'static str,
    body: String,
    no_cache: bool,
}

impl Reply {
    fn html(body: impl Into<String>) -> Self {
        Self { status: 200, content_type: "text/html", body: body.into(), no_cache: false }
    }

    fn json(body: impl Into<String>) -> Self {
        Self { status: 200, content_type: "application/json", body: body.into(), no_cache: false }
    }

    fn text(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: "text/plain; charset=utf-8",
            body: body.into(),
            no_cache: false,
        }
    }

    fn error(status: u16, message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        Self { status, content_type: "application/json", body, no_cache: false }
    }

    fn from_viewer_error(err: &ViewerError) -> Self {
        Self::error(err.status_code(), &err.to_string())
    }
}

/// Start the server on the configured port and serve until the process is
/// killed. `open_browser` launches the default browser at the viewer URL.
pub fn start(config: Config, open_browser: bool) -> std::io::Result<()> {
    let addr = format!("127.0.0.1:{}", config.port);
    let server = Server::http(&addr)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let url = format!("http://localhost:{}", config.port);

    eprintln!("\n\x1b[1;32mCloneview\x1b[0m");
    eprintln!("   {}", url);
    eprintln!("   Source root: {}", config.source_directory.display());
    eprintln!("   Artifacts:   {}\n", config.data_directory.display());

    if open_browser {
        let _ = open::that(&url);
    }

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &config) {
            warn!("request failed: {}", e);
        }
    }

    Ok(())
}

fn handle_request(request: Request, config: &Config) -> std::io::Result<()> {
    let url = request.url().to_string();
    let (path, query) = match url.split_once('?') {
        Some((p, q)) => (p, q),
        None => (url.as_str(), ""),
    };
    debug!("{} {}", request.method(), path);

    let reply = match (request.method(), path) {
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Reply::html(UI_HTML),
        (&Method::Get, "/api/files") => api_files(config),
        (&Method::Get, "/api/file") => api_file(config, query),
        (&Method::Get, "/api/config") => api_config(config),
        (&Method::Get, p) => match artifact_stem(p) {
            Some(stem) => api_artifact(config, stem),
            None => Reply::error(404, "Not found"),
        },
        _ => Reply::error(404, "Not found"),
    };

    respond(request, reply)
}

fn respond(request: Request, reply: Reply) -> std::io::Result<()> {
    let mut response = Response::from_string(reply.body)
        .with_status_code(reply.status)
        .with_header(
            Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()).unwrap(),
        );
    if reply.no_cache {
        for (name, value) in [
            ("Cache-Control", "no-store, no-cache, must-revalidate, private"),
            ("Expires", "-1"),
            ("Pragma", "no-cache"),
        ] {
            response = response
                .with_header(Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap());
        }
    }
    request.respond(response)
}

/// `/api/files`: JSON array of relative paths under the source root.
fn api_files(config: &Config) -> Reply {
    match scan::enumerate(&config.source_directory, &config.source_extension) {
        Ok(files) => match serde_json::to_string(&files) {
            Ok(json) => Reply::json(json),
            Err(e) => Reply::error(500, &e.to_string()),
        },
        Err(e) => {
            warn!("enumeration failed: {}", e);
            Reply::from_viewer_error(&e)
        }
    }
}

/// `/api/file?path=…`: raw text of one file inside the source root.
fn api_file(config: &Config, query: &str) -> Reply {
    let parsed: FileQuery = match serde_urlencoded::from_str(query) {
        Ok(q) => q,
        Err(_) => FileQuery { path: String::new() },
    };

    match resolve::resolve_and_read(&config.source_directory, &parsed.path) {
        Ok(content) => Reply::text(content),
        Err(e) => {
            warn!("file fetch rejected: {}", e);
            Reply::from_viewer_error(&e)
        }
    }
}

/// `/api/config`: the active configuration (camelCase keys).
fn api_config(config: &Config) -> Reply {
    match serde_json::to_string(config) {
        Ok(json) => Reply::json(json),
        Err(e) => Reply::error(500, &e.to_string()),
    }
}

/// Match `/api/<stem>` against the known artifact names.
fn artifact_stem(path: &str) -> Option<&'static str> {
    let stem = path.strip_prefix("/api/")?;
    ARTIFACTS.iter().find(|&&a| a == stem).copied()
}

/// Serve `<data_directory>/<stem>.json` verbatim, uncacheable.
fn api_artifact(config: &Config, stem: &str) -> Reply {
    let path = config.data_directory.join(format!("{}.json", stem));
    match std::fs::read_to_string(&path) {
        Ok(body) => {
            let mut reply = Reply::json(body);
            reply.no_cache = true;
            reply
        }
        Err(e) => {
            warn!("artifact {} unavailable: {}", stem, e);
            Reply::error(500, &format!("Failed to load {}", stem))
        }
    }
}
