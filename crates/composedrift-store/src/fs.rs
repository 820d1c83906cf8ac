use crate::{ManifestStore, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed manifest store: one file per compose at
/// `{data_dir}/{compose_id}`, content a JSON array of package build
/// strings with no wrapping object or metadata.
pub struct FsStore {
    data_dir: PathBuf,
}

impl FsStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn manifest_path(&self, compose_id: &str) -> PathBuf {
        self.data_dir.join(compose_id)
    }
}

impl ManifestStore for FsStore {
    fn has(&self, compose_id: &str) -> bool {
        self.manifest_path(compose_id).exists()
    }

    fn get(&self, compose_id: &str) -> Result<Vec<String>, StoreError> {
        let path = self.manifest_path(compose_id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotCached(compose_id.to_owned()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn put(&self, compose_id: &str, manifest: &[String]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.manifest_path(compose_id);
        fs::write(&path, serde_json::to_string(manifest)?)?;
        debug!("cached {} packages at {}", manifest.len(), path.display());
        Ok(())
    }
}
