use super::{json_pretty, spin_fail, spin_ok, spinner, EXIT_SUCCESS};
use composedrift_remote::ComposeClient;
use composedrift_store::FsStore;

pub fn run(client: &ComposeClient, store: &FsStore, keep: usize, json: bool) -> Result<u8, String> {
    let pb = spinner(&format!("syncing the {keep} newest composes"));
    let report = match composedrift_remote::sync_composes(client, store, keep) {
        Ok(report) => report,
        Err(e) => {
            spin_fail(&pb, "sync failed");
            return Err(e.to_string());
        }
    };
    spin_ok(
        &pb,
        &format!(
            "discovered {} composes: {} fetched, {} cached, {} failed",
            report.discovered.len(),
            report.fetched.len(),
            report.cached.len(),
            report.failed.len()
        ),
    );

    if json {
        println!("{}", json_pretty(&report)?);
    }
    Ok(EXIT_SUCCESS)
}
