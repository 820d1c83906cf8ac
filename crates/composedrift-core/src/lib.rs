//! Compose discovery and manifest diffing for composedrift.
//!
//! The two pieces of real logic in the system live here: the discoverer,
//! which scrapes compose identifiers out of a directory listing page, and
//! the differ, which joins two cached manifests by package name and
//! reports every name whose build string changed. Both are pure with
//! respect to the network; the differ reads manifests through the
//! [`composedrift_store::ManifestStore`] seam and never fetches.

pub mod diff;
pub mod discover;

pub use diff::{diff, diff_manifests, package_name, DiffEntry, DiffReport};
pub use discover::discover;

use composedrift_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
