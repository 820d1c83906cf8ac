use crate::{ComposeClient, RemoteError};
use composedrift_core::discover;
use composedrift_store::ManifestStore;
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of a single manifest fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Downloaded and written to the store.
    Fetched,
    /// The store already had an entry; no network access happened.
    Cached,
    /// Non-200 from the source; nothing written. Carries the status code.
    Failed(u16),
}

/// What one sync run discovered and did, per compose identifier.
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    pub discovered: Vec<String>,
    pub fetched: Vec<String>,
    pub cached: Vec<String>,
    pub failed: Vec<String>,
}

/// Fetch one compose's manifest into the store.
///
/// Idempotent: an already-cached compose is a no-op without network
/// access. A non-200 response is reported through the returned
/// [`FetchOutcome::Failed`] and logged, leaving the cache entry absent so
/// a later run can retry; a malformed body or transport failure
/// propagates as an error.
pub fn fetch_manifest(
    client: &ComposeClient,
    store: &dyn ManifestStore,
    compose_id: &str,
) -> Result<FetchOutcome, RemoteError> {
    if store.has(compose_id) {
        info!("{compose_id} found in cache, skipping download");
        return Ok(FetchOutcome::Cached);
    }

    match client.fetch_manifest_document(compose_id) {
        Ok(manifest) => {
            store.put(compose_id, &manifest)?;
            info!("downloaded rpms.json for {compose_id} ({} packages)", manifest.len());
            Ok(FetchOutcome::Fetched)
        }
        Err(RemoteError::Status { code, url }) => {
            warn!("failed to download rpms.json for {compose_id} from {url}: HTTP {code}");
            Ok(FetchOutcome::Failed(code))
        }
        Err(e) => Err(e),
    }
}

/// Discover the `keep` newest composes and fetch every manifest the cache
/// is missing, oldest first.
///
/// Failed fetches are skipped, not retried, and do not cancel the rest of
/// the run. A non-200 listing response is logged and yields an empty
/// report; there is nothing to discover that run.
pub fn sync_composes(
    client: &ComposeClient,
    store: &dyn ManifestStore,
    keep: usize,
) -> Result<SyncReport, RemoteError> {
    let listing = match client.fetch_listing() {
        Ok(body) => body,
        Err(RemoteError::Status { code, url }) => {
            warn!("failed to fetch compose listing from {url}: HTTP {code}");
            return Ok(SyncReport::default());
        }
        Err(e) => return Err(e),
    };

    let mut report = SyncReport {
        discovered: discover(&listing, keep),
        ..SyncReport::default()
    };

    for compose_id in &report.discovered {
        match fetch_manifest(client, store, compose_id)? {
            FetchOutcome::Fetched => report.fetched.push(compose_id.clone()),
            FetchOutcome::Cached => report.cached.push(compose_id.clone()),
            FetchOutcome::Failed(_) => report.failed.push(compose_id.clone()),
        }
    }

    Ok(report)
}
