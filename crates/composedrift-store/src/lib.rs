//! Cached compose manifest storage for composedrift.
//!
//! A manifest is the flat list of package build strings belonging to one
//! compose. This crate provides the `ManifestStore` seam over that cache:
//! the file-backed [`FsStore`] used in production (one JSON array per
//! compose under a data directory) and an in-memory [`MemoryStore`] for
//! tests. Cache entries are written once and never invalidated, because a
//! dated compose's content is immutable.

pub mod fs;
pub mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("manifest not cached: {0}")]
    NotCached(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage seam for per-compose package manifests, keyed by compose
/// identifier.
pub trait ManifestStore: Send + Sync {
    /// Check whether a manifest is already cached, without reading it.
    fn has(&self, compose_id: &str) -> bool;

    /// Read a cached manifest. A missing entry is
    /// [`StoreError::NotCached`].
    fn get(&self, compose_id: &str) -> Result<Vec<String>, StoreError>;

    /// Write a manifest, replacing any existing entry.
    fn put(&self, compose_id: &str, manifest: &[String]) -> Result<(), StoreError>;
}
