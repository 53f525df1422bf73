//! Built-in verification modules and their constructor catalog.
//!
//! Each module lives in its own file and is registered here under the entry
//! key its on-disk manifest refers to. The implementations are opaque to the
//! registry: they do their own outbound HTTP and return whichever result
//! shape their generation of the capability contract used.

pub mod balance;
pub mod example;
pub mod judgment;
pub mod metadata;

use verihub_core::capability::BoxCapability;
use verihub_core::catalog::CapabilityCatalog;

/// The catalog of every verification module compiled into this binary.
pub fn builtin_catalog() -> CapabilityCatalog {
    let mut catalog = CapabilityCatalog::new();

    catalog.register("example", "ExampleVerification", || {
        Ok(BoxCapability::new(example::ExampleVerification))
    });
    catalog.register("metadata_validation", "MetadataValidation", || {
        Ok(BoxCapability::new(metadata::MetadataValidation::new()?))
    });
    catalog.register("remote_judgment", "RemoteJudgment", || {
        Ok(BoxCapability::new(judgment::RemoteJudgment::new()?))
    });
    catalog.register("account_balance", "AccountBalanceCheck", || {
        Ok(BoxCapability::new(balance::AccountBalanceCheck::new()?))
    });

    catalog
}

#[cfg(test)]
mod tests {
    use verihub_types::manifest::Manifest;

    use super::*;

    fn manifest(name: &str, path: &str) -> Manifest {
        Manifest {
            name: name.to_owned(),
            description: String::new(),
            path: path.to_owned(),
            parameters: Vec::new(),
        }
    }

    #[test]
    fn every_builtin_constructs() {
        let catalog = builtin_catalog();
        for (name, path) in [
            ("ExampleVerification", "./example"),
            ("MetadataValidation", "./metadata_validation"),
            ("RemoteJudgment", "./remote_judgment"),
            ("AccountBalanceCheck", "./account_balance"),
        ] {
            catalog
                .load(&manifest(name, path))
                .unwrap_or_else(|e| panic!("{name} failed to construct: {e}"));
        }
    }
}
