//! Module manifest domain types.
//!
//! Every verification module declares itself through a `manifest.json` at the
//! root of its directory: the registered name, a human-readable description,
//! the entry reference to the implementation, and the parameters it accepts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parsed `manifest.json` for one verification module.
///
/// Immutable after read; the registry copies `name`, `description`, and
/// `parameters` into its entry at load time, so editing a manifest on disk
/// only takes effect on the next reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// The name the module is registered under. Must be non-empty and is
    /// also the constructor export the loader instantiates.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Relative entry reference to the implementation
    /// (e.g. `"./metadata_validation"`).
    pub path: String,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

/// One declared parameter of a verification module.
///
/// Purely introspective: the registry surfaces these through the listing API
/// but never enforces them. Unknown `type` tags pass through uninterpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_tag: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// The introspection record exposed for one registered capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityInfo {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
}
