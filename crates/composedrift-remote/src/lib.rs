//! Compose listing and manifest retrieval for composedrift.
//!
//! This crate owns all network access: fetching the compose directory
//! listing, downloading per-compose `rpms.json` documents, and the sync
//! workflow that walks the newest composes and fills the manifest cache.
//! Everything is blocking and sequential; a fetch that fails with a
//! non-200 status is logged and skipped, never retried within the run.

pub mod config;
pub mod http;
pub mod sync;

pub use config::SourceConfig;
pub use http::ComposeClient;
pub use sync::{fetch_manifest, sync_composes, FetchOutcome, SyncReport};

use composedrift_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    /// Non-200 response from the compose source. Transient: the sync loop
    /// logs it and moves on.
    #[error("HTTP {code} for {url}")]
    Status { code: u16, url: String },
    /// Transport-level failure (DNS, refused connection, broken body).
    #[error("HTTP error: {0}")]
    Http(String),
    /// The manifest document came back 200 but without the expected
    /// `payload.rpms.Everything.x86_64` shape. Fatal; never downgraded to
    /// an empty manifest.
    #[error("malformed upstream manifest for {compose_id}: {reason}")]
    MalformedManifest { compose_id: String, reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}
