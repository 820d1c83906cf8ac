use super::EXIT_SUCCESS;
use composedrift_store::{FsStore, ManifestStore};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub fn run(data_dir: &Path, bind: &str, port: u16) -> Result<u8, String> {
    std::fs::create_dir_all(data_dir)
        .map_err(|e| format!("failed to create {}: {e}", data_dir.display()))?;
    info!("data directory: {}", data_dir.display());

    let addr = format!("{bind}:{port}");
    let store: Arc<dyn ManifestStore> = Arc::new(FsStore::new(data_dir));
    // Blocks until the process is killed.
    composedrift_server::run_server(&store, &addr);
    Ok(EXIT_SUCCESS)
}
