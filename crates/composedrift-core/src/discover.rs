use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Shape of a nightly compose identifier as it appears in the directory
/// listing, e.g. `Fedora-41-20241023.n.0`.
static COMPOSE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Fedora-\d{2}-\d{8}\.n\.\d+").expect("valid compose pattern"));

/// Scan a directory listing page for compose identifiers and return the
/// `keep` most recent ones, ascending.
///
/// Matches are deduplicated and sorted lexicographically; the fixed-width
/// date embedded in the identifier makes string order chronological.
/// Fewer than `keep` matches returns all of them, zero matches returns an
/// empty vector.
pub fn discover(listing: &str, keep: usize) -> Vec<String> {
    let unique: BTreeSet<&str> = COMPOSE_ID.find_iter(listing).map(|m| m.as_str()).collect();
    let skip = unique.len().saturating_sub(keep);
    unique.into_iter().skip(skip).map(str::to_owned).collect()
}
