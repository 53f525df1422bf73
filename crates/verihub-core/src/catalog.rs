//! Constructor catalog: the compile-time stand-in for loading a module
//! implementation by its manifest entry reference.
//!
//! The original deployment resolved entry references at runtime against files
//! on disk and then instantiated the export named in the manifest. Here the
//! same two-step resolution runs against a registration table: entry
//! reference -> module, then `manifest.name` -> constructor export within
//! that module. Anything a manifest names that is not in the table fails
//! with a [`LoadError`], which the scanner recovers from per module.

use std::collections::HashMap;
use std::path::Path;

use verihub_types::error::LoadError;
use verihub_types::manifest::Manifest;

use crate::capability::BoxCapability;

/// Constructs one capability instance. Construction may run arbitrary module
/// initialization; the registry treats failures as opaque load errors.
pub type Constructor = fn() -> anyhow::Result<BoxCapability>;

/// Registration table mapping module keys to their named constructor exports.
#[derive(Default)]
pub struct CapabilityCatalog {
    modules: HashMap<String, HashMap<String, Constructor>>,
}

impl CapabilityCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under `module` with the exported name `export`.
    ///
    /// Re-registering the same module/export pair replaces the constructor.
    pub fn register(&mut self, module: &str, export: &str, ctor: Constructor) {
        self.modules
            .entry(module.to_owned())
            .or_default()
            .insert(export.to_owned(), ctor);
    }

    /// Instantiate the capability a manifest describes.
    ///
    /// Resolves `manifest.path` to a module key, looks up the export named
    /// `manifest.name`, and invokes the constructor.
    pub fn load(&self, manifest: &Manifest) -> Result<BoxCapability, LoadError> {
        let key = module_key(&manifest.path);
        let exports = self
            .modules
            .get(&key)
            .ok_or_else(|| LoadError::UnresolvedEntry(manifest.path.clone()))?;

        let ctor = exports
            .get(&manifest.name)
            .ok_or_else(|| LoadError::MissingExport {
                module: key.clone(),
                export: manifest.name.clone(),
            })?;

        ctor().map_err(|e| LoadError::Init {
            name: manifest.name.clone(),
            reason: e.to_string(),
        })
    }
}

/// Normalize an entry reference to a catalog module key: strip a leading
/// `./` and any file extension, so `"./metadata_validation"`,
/// `"metadata_validation"`, and `"./metadata_validation.rs"` all resolve to
/// the same module.
fn module_key(entry: &str) -> String {
    let trimmed = entry.trim_start_matches("./");
    Path::new(trimmed)
        .with_extension("")
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::capability::{Capability, Params};

    struct Stub;

    impl Capability for Stub {
        async fn execute(&self, _params: Params) -> anyhow::Result<Value> {
            Ok(Value::Bool(true))
        }
    }

    fn stub_ctor() -> anyhow::Result<BoxCapability> {
        Ok(BoxCapability::new(Stub))
    }

    fn failing_ctor() -> anyhow::Result<BoxCapability> {
        anyhow::bail!("missing API credentials")
    }

    fn manifest(name: &str, path: &str) -> Manifest {
        Manifest {
            name: name.to_owned(),
            description: String::new(),
            path: path.to_owned(),
            parameters: Vec::new(),
        }
    }

    #[test]
    fn module_key_normalization() {
        assert_eq!(module_key("./example"), "example");
        assert_eq!(module_key("example"), "example");
        assert_eq!(module_key("./example.rs"), "example");
        assert_eq!(module_key("./nested/check"), "nested/check");
    }

    #[tokio::test]
    async fn load_resolves_module_and_export() {
        let mut catalog = CapabilityCatalog::new();
        catalog.register("example", "ExampleVerification", stub_ctor);

        let capability = catalog
            .load(&manifest("ExampleVerification", "./example"))
            .unwrap();
        let value = capability.execute(Params::new()).await.unwrap();
        assert_eq!(value, Value::Bool(true));
    }

    #[test]
    fn load_accepts_entry_with_extension() {
        let mut catalog = CapabilityCatalog::new();
        catalog.register("example", "ExampleVerification", stub_ctor);

        assert!(catalog
            .load(&manifest("ExampleVerification", "./example.rs"))
            .is_ok());
    }

    #[test]
    fn load_fails_on_unknown_entry() {
        let catalog = CapabilityCatalog::new();
        let err = catalog
            .load(&manifest("Whatever", "./nonexistent"))
            .unwrap_err();
        assert!(matches!(err, LoadError::UnresolvedEntry(_)));
    }

    #[test]
    fn load_fails_on_missing_export() {
        let mut catalog = CapabilityCatalog::new();
        catalog.register("example", "ExampleVerification", stub_ctor);

        let err = catalog
            .load(&manifest("SomethingElse", "./example"))
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingExport { .. }));
    }

    #[test]
    fn load_surfaces_constructor_failure() {
        let mut catalog = CapabilityCatalog::new();
        catalog.register("broken", "Broken", failing_ctor);

        let err = catalog.load(&manifest("Broken", "./broken")).unwrap_err();
        match err {
            LoadError::Init { name, reason } => {
                assert_eq!(name, "Broken");
                assert!(reason.contains("missing API credentials"));
            }
            other => panic!("expected Init error, got {other:?}"),
        }
    }
}
