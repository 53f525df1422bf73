//! Scanning the module tree into a registry snapshot.

use std::path::Path;

use verihub_core::catalog::CapabilityCatalog;
use verihub_core::registry::{RegistryEntry, RegistrySnapshot};
use verihub_types::error::ManifestError;

use crate::manifest::read_manifest;

/// Build a complete registry snapshot from every module directory under
/// `root`.
///
/// Directories are visited in lexicographic order, so a duplicate `name`
/// is always resolved the same way: the later directory wins. Failures are
/// isolated per module -- a directory with a broken manifest or an
/// implementation that fails to load is logged and skipped, and the scan
/// continues. Only a failure to enumerate `root` itself aborts the pass.
///
/// The returned snapshot is complete; publishing it is the caller's
/// decision.
pub fn build_snapshot(
    root: &Path,
    catalog: &CapabilityCatalog,
) -> std::io::Result<RegistrySnapshot> {
    let mut dirs: Vec<_> = std::fs::read_dir(root)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    let mut snapshot = RegistrySnapshot::new();

    for dir in dirs {
        let manifest = match read_manifest(&dir) {
            Ok(manifest) => manifest,
            Err(ManifestError::Missing(_)) => {
                tracing::debug!(dir = %dir.display(), "no manifest.json, not a module");
                continue;
            }
            Err(err) => {
                tracing::warn!(dir = %dir.display(), error = %err, "skipping module with invalid manifest");
                continue;
            }
        };

        let capability = match catalog.load(&manifest) {
            Ok(capability) => capability,
            Err(err) => {
                tracing::warn!(module = %manifest.name, error = %err, "skipping module that failed to load");
                continue;
            }
        };

        if let Some(displaced) = snapshot.insert(RegistryEntry::new(&manifest, capability)) {
            tracing::warn!(
                module = %displaced.name,
                dir = %dir.display(),
                "duplicate module name, later directory wins"
            );
        }
    }

    tracing::debug!(count = snapshot.len(), root = %root.display(), "module scan complete");
    Ok(snapshot)
}
