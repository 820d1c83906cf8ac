use super::{json_pretty, EXIT_SUCCESS};
use composedrift_core::DiffEntry;
use composedrift_store::FsStore;
use console::Style;

/// Split a `<old>:<new>` pair argument.
pub fn parse_pair(pair: &str) -> Result<(&str, &str), String> {
    match pair.split_once(':') {
        Some((old_id, new_id)) if !old_id.is_empty() && !new_id.is_empty() => Ok((old_id, new_id)),
        _ => Err(format!("invalid compose pair '{pair}', expected <old>:<new>")),
    }
}

fn drift_line(name: &str, entry: &DiffEntry) -> String {
    match (&entry.old, &entry.new) {
        (Some(old), Some(new)) => {
            format!("  {} {name}: {old} -> {new}", Style::new().cyan().apply_to("~"))
        }
        (Some(old), None) => format!("  {} {name}: {old}", Style::new().red().apply_to("-")),
        (None, Some(new)) => format!("  {} {name}: {new}", Style::new().green().apply_to("+")),
        (None, None) => String::new(),
    }
}

pub fn run(store: &FsStore, pair: &str, json: bool) -> Result<u8, String> {
    let (old_id, new_id) = parse_pair(pair)?;
    let report = composedrift_core::diff(store, old_id, new_id).map_err(|e| e.to_string())?;

    if json {
        println!("{}", json_pretty(&report.changed)?);
    } else if report.is_empty() {
        println!("no package drift between {old_id} and {new_id}");
    } else {
        let noun = if report.changed.len() == 1 {
            "package"
        } else {
            "packages"
        };
        println!(
            "{} {noun} changed between {old_id} and {new_id}:",
            report.changed.len()
        );
        for (name, entry) in &report.changed {
            println!("{}", drift_line(name, entry));
        }
    }
    Ok(EXIT_SUCCESS)
}
