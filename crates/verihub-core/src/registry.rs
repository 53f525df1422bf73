//! Registry snapshots and their atomic publication.
//!
//! One scan pass produces one immutable [`RegistrySnapshot`]. The published
//! snapshot lives behind an `ArcSwap`: readers clone an `Arc` with no lock
//! and keep using the snapshot they captured for the whole call, while the
//! reload path replaces the pointer in a single atomic store. Old snapshots
//! drop once the last in-flight call releases them.

use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde_json::Value;

use verihub_types::manifest::{CapabilityInfo, Manifest, ParameterSpec};

use crate::capability::{BoxCapability, Params};

/// One registered capability: introspection fields copied from the manifest
/// at load time, plus the instantiated implementation.
#[derive(Debug)]
pub struct RegistryEntry {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
    capability: BoxCapability,
}

impl RegistryEntry {
    pub fn new(manifest: &Manifest, capability: BoxCapability) -> Self {
        Self {
            name: manifest.name.clone(),
            description: manifest.description.clone(),
            parameters: manifest.parameters.clone(),
            capability,
        }
    }

    /// The introspection record for this entry.
    pub fn info(&self) -> CapabilityInfo {
        CapabilityInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.parameters.clone(),
        }
    }

    /// Invoke the underlying capability.
    pub async fn execute(&self, params: Params) -> anyhow::Result<Value> {
        self.capability.execute(params).await
    }
}

/// An immutable name-keyed registry state produced by one scan pass.
///
/// Keys are entry names; iteration (and therefore listing) is sorted by name
/// and stable within one snapshot.
#[derive(Debug, Default)]
pub struct RegistrySnapshot {
    entries: BTreeMap<String, RegistryEntry>,
}

impl RegistrySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry under its own name, returning the displaced entry if
    /// the name was already taken (last insert wins).
    pub fn insert(&mut self, entry: RegistryEntry) -> Option<RegistryEntry> {
        self.entries.insert(entry.name.clone(), entry)
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Introspection records for every entry, sorted by name.
    pub fn infos(&self) -> Vec<CapabilityInfo> {
        self.entries.values().map(RegistryEntry::info).collect()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

/// The published-snapshot cell: the one piece of shared mutable state.
///
/// Single writer (the reload path), any number of lock-free readers.
pub struct CapabilityRegistry {
    snap: ArcSwap<RegistrySnapshot>,
}

impl CapabilityRegistry {
    /// Start with an empty published snapshot.
    pub fn new() -> Self {
        Self {
            snap: ArcSwap::from_pointee(RegistrySnapshot::new()),
        }
    }

    /// Capture the currently published snapshot.
    ///
    /// The returned `Arc` stays valid for the caller's whole operation even
    /// if a newer snapshot is published meanwhile.
    pub fn current(&self) -> Arc<RegistrySnapshot> {
        self.snap.load_full()
    }

    /// Atomically replace the published snapshot.
    pub fn publish(&self, snapshot: RegistrySnapshot) {
        self.snap.store(Arc::new(snapshot));
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capability;

    struct Fixed(bool);

    impl Capability for Fixed {
        async fn execute(&self, _params: Params) -> anyhow::Result<Value> {
            Ok(Value::Bool(self.0))
        }
    }

    fn entry(name: &str, description: &str, pass: bool) -> RegistryEntry {
        let manifest = Manifest {
            name: name.to_owned(),
            description: description.to_owned(),
            path: format!("./{name}"),
            parameters: Vec::new(),
        };
        RegistryEntry::new(&manifest, BoxCapability::new(Fixed(pass)))
    }

    #[test]
    fn entry_name_equals_storage_key() {
        let mut snapshot = RegistrySnapshot::new();
        snapshot.insert(entry("WalletVerification", "wallet", true));

        let stored = snapshot.get("WalletVerification").unwrap();
        assert_eq!(stored.name, "WalletVerification");
    }

    #[test]
    fn insert_is_last_wins() {
        let mut snapshot = RegistrySnapshot::new();
        assert!(snapshot.insert(entry("X", "first", true)).is_none());
        let displaced = snapshot.insert(entry("X", "second", false)).unwrap();

        assert_eq!(displaced.description, "first");
        assert_eq!(snapshot.get("X").unwrap().description, "second");
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn listing_is_sorted_by_name() {
        let mut snapshot = RegistrySnapshot::new();
        snapshot.insert(entry("Zeta", "", true));
        snapshot.insert(entry("Alpha", "", true));
        snapshot.insert(entry("Mid", "", true));

        assert_eq!(snapshot.names(), vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn publish_replaces_current_snapshot() {
        let registry = CapabilityRegistry::new();
        assert!(registry.current().is_empty());

        let mut snapshot = RegistrySnapshot::new();
        snapshot.insert(entry("A", "", true));
        registry.publish(snapshot);

        assert_eq!(registry.current().len(), 1);
    }

    #[tokio::test]
    async fn captured_snapshot_survives_republication() {
        let registry = CapabilityRegistry::new();
        let mut snapshot = RegistrySnapshot::new();
        snapshot.insert(entry("Doomed", "", true));
        registry.publish(snapshot);

        let captured = registry.current();

        // The entry disappears from the published registry mid-call.
        registry.publish(RegistrySnapshot::new());

        let entry = captured.get("Doomed").unwrap();
        let value = entry.execute(Params::new()).await.unwrap();
        assert_eq!(value, Value::Bool(true));
        assert!(registry.current().is_empty());
    }
}
