use crate::CoreError;
use composedrift_store::ManifestStore;
use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// Old/new build strings for one package name across two composes.
/// `None` marks absence from that side's manifest; a real build string
/// never collides with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffEntry {
    pub old: Option<String>,
    pub new: Option<String>,
}

impl DiffEntry {
    fn is_changed(&self) -> bool {
        self.old != self.new
    }
}

/// Wire format: a two-element array `[oldOrNull, newOrNull]`.
impl Serialize for DiffEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(&self.old)?;
        pair.serialize_element(&self.new)?;
        pair.end()
    }
}

/// Report of package drift between two composes. `changed` holds only the
/// names whose build string differs, including packages present on one
/// side only.
#[derive(Debug, Serialize)]
pub struct DiffReport {
    pub old_id: String,
    pub new_id: String,
    pub changed: BTreeMap<String, DiffEntry>,
}

impl DiffReport {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Derive the package name from a full `name-version-release` build
/// string by dropping the two trailing `-` segments, splitting from the
/// right. A name that itself embeds version-like hyphen segments gets
/// mis-keyed; that ambiguity is inherent to the upstream format and the
/// rule is kept as-is.
pub fn package_name(build: &str) -> &str {
    build.rsplitn(3, '-').last().unwrap_or(build)
}

/// Diff two cached composes by identifier.
///
/// Both manifests must already be cached; a missing one surfaces as
/// `StoreError::NotCached`. Comparison never triggers a fetch.
pub fn diff(
    store: &dyn ManifestStore,
    old_id: &str,
    new_id: &str,
) -> Result<DiffReport, CoreError> {
    let old_manifest = store.get(old_id)?;
    let new_manifest = store.get(new_id)?;
    Ok(diff_manifests(old_id, new_id, &old_manifest, &new_manifest))
}

/// Join two manifests by package name and keep the names whose build
/// string changed.
///
/// One `info!` line per changed entry is emitted in insertion order: old
/// manifest order first, then names only present in the new manifest, in
/// its order. Duplicate names within one manifest do not crash; the last
/// occurrence wins.
pub fn diff_manifests(
    old_id: &str,
    new_id: &str,
    old_manifest: &[String],
    new_manifest: &[String],
) -> DiffReport {
    let mut order: Vec<&str> = Vec::new();
    let mut slots: HashMap<&str, DiffEntry> = HashMap::new();

    for build in old_manifest {
        let name = package_name(build);
        let entry = slots.entry(name).or_insert_with(|| {
            order.push(name);
            DiffEntry::default()
        });
        entry.old = Some(build.clone());
        entry.new = None;
    }

    for build in new_manifest {
        let name = package_name(build);
        let entry = slots.entry(name).or_insert_with(|| {
            order.push(name);
            DiffEntry::default()
        });
        entry.new = Some(build.clone());
    }

    let mut changed = BTreeMap::new();
    for name in order {
        let entry = &slots[name];
        if entry.is_changed() {
            info!(
                "{} changed to {}",
                entry.old.as_deref().unwrap_or("(absent)"),
                entry.new.as_deref().unwrap_or("(absent)")
            );
            changed.insert(name.to_owned(), entry.clone());
        }
    }

    DiffReport {
        old_id: old_id.to_owned(),
        new_id: new_id.to_owned(),
        changed,
    }
}
