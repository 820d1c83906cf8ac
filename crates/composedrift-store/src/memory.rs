use crate::{ManifestStore, StoreError};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory manifest store. Backs tests that exercise caching policy
/// without touching the filesystem.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ManifestStore for MemoryStore {
    fn has(&self, compose_id: &str) -> bool {
        let entries = self.entries.read().expect("store lock poisoned");
        entries.contains_key(compose_id)
    }

    fn get(&self, compose_id: &str) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.read().expect("store lock poisoned");
        entries
            .get(compose_id)
            .cloned()
            .ok_or_else(|| StoreError::NotCached(compose_id.to_owned()))
    }

    fn put(&self, compose_id: &str, manifest: &[String]) -> Result<(), StoreError> {
        let mut entries = self.entries.write().expect("store lock poisoned");
        entries.insert(compose_id.to_owned(), manifest.to_vec());
        Ok(())
    }
}
