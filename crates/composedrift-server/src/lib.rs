//! HTTP endpoint serving compose diffs.
//!
//! One route does the work: `GET /<old>:<new>` loads both cached
//! manifests and answers with the changed packages as a JSON object
//! keyed by package name, each value a two-element array
//! `[oldBuildOrNull, newBuildOrNull]`. Comparison never fetches, so a
//! compose that was never synced answers 404. Requests are handled
//! synchronously, one at a time; compare traffic never writes the store.
//!
//! The [`TestServer`] helper starts a server on a random port for
//! integration testing.

use composedrift_core::CoreError;
use composedrift_store::{FsStore, ManifestStore, StoreError};
use std::path::PathBuf;
use std::sync::Arc;
use tiny_http::{Header, Method, Response, Server, StatusCode};
use tracing::{debug, info, warn};

/// Parse a request path of the form `/<old>:<new>`. Both identifiers
/// must be non-empty; query strings are not part of the route.
pub fn parse_compare_route(path: &str) -> Option<(&str, &str)> {
    let pair = path.strip_prefix('/')?;
    let (old_id, new_id) = pair.split_once(':')?;
    if old_id.is_empty() || new_id.is_empty() || new_id.contains('/') || old_id.contains('/') {
        return None;
    }
    Some((old_id, new_id))
}

fn respond_err(req: tiny_http::Request, code: u16, msg: &str) {
    let _ = req.respond(Response::from_string(msg).with_status_code(StatusCode(code)));
}

fn respond_json(req: tiny_http::Request, json: impl Into<Vec<u8>>) {
    let header = Header::from_bytes("Content-Type", "application/json").expect("valid header");
    let _ = req.respond(Response::from_data(json.into()).with_header(header));
}

fn handle_compare(store: &dyn ManifestStore, req: tiny_http::Request, old_id: &str, new_id: &str) {
    match composedrift_core::diff(store, old_id, new_id) {
        Ok(report) => {
            info!(
                "compared {old_id} to {new_id}: {} changed packages",
                report.changed.len()
            );
            let json = serde_json::to_vec(&report.changed).unwrap_or_else(|_| b"{}".to_vec());
            respond_json(req, json);
        }
        Err(CoreError::Store(StoreError::NotCached(id))) => {
            warn!("compare {old_id}:{new_id}: manifest not cached: {id}");
            respond_err(req, 404, &format!("manifest not cached: {id}"));
        }
        Err(e) => {
            warn!("compare {old_id}:{new_id}: {e}");
            respond_err(req, 500, &e.to_string());
        }
    }
}

/// Handle a single HTTP request, dispatching to the appropriate route.
pub fn handle_request(store: &dyn ManifestStore, req: tiny_http::Request) {
    let method = req.method().clone();
    let url = req.url().to_owned();
    debug!("{method} {url}");

    if method != Method::Get {
        respond_err(req, 405, "method not allowed");
        return;
    }

    if url == "/health" {
        let _ = req.respond(Response::from_string(r#"{"status":"ok"}"#));
    } else if let Some((old_id, new_id)) = parse_compare_route(&url) {
        handle_compare(store, req, old_id, new_id);
    } else {
        respond_err(req, 404, "not found");
    }
}

/// Start the server loop, blocking the current thread.
pub fn run_server(store: &Arc<dyn ManifestStore>, addr: &str) {
    let server = Server::http(addr).expect("failed to bind HTTP server");
    info!("serving compose diffs on {addr}");
    for request in server.incoming_requests() {
        handle_request(store.as_ref(), request);
    }
}

/// A test helper that starts a composedrift server on a random port in a
/// background thread, backed by an [`FsStore`] over the given data dir.
pub struct TestServer {
    pub url: String,
    pub port: u16,
    pub data_dir: PathBuf,
    _server: Arc<Server>,
    _handle: std::thread::JoinHandle<()>,
}

impl TestServer {
    /// Bind to `127.0.0.1:0` (random port) and serve until dropped.
    pub fn start(data_dir: PathBuf) -> Self {
        std::fs::create_dir_all(&data_dir).expect("failed to create test data dir");
        let server =
            Arc::new(Server::http("127.0.0.1:0").expect("failed to bind test HTTP server"));
        let port = server.server_addr().to_ip().expect("not an IP addr").port();
        let url = format!("http://127.0.0.1:{port}");

        let store: Arc<dyn ManifestStore> = Arc::new(FsStore::new(data_dir.clone()));
        let srv = Arc::clone(&server);
        let handle = std::thread::spawn(move || {
            for request in srv.incoming_requests() {
                handle_request(store.as_ref(), request);
            }
        });

        Self {
            url,
            port,
            data_dir,
            _server: server,
            _handle: handle,
        }
    }
}
