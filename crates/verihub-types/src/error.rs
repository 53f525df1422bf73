use std::path::PathBuf;

use thiserror::Error;

/// Errors reading a module's `manifest.json`.
///
/// All of these are recovered locally by the registry scanner: the offending
/// module is logged and skipped, and the scan continues.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("no manifest.json in {0}")]
    Missing(PathBuf),

    #[error("failed to read {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("manifest field '{0}' must be a non-empty string")]
    MissingField(&'static str),
}

/// Errors instantiating a module's capability from its manifest.
///
/// Recovered locally by the registry scanner, same as [`ManifestError`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("entry '{0}' does not resolve to a known module")]
    UnresolvedEntry(String),

    #[error("module '{module}' does not export '{export}'")]
    MissingExport { module: String, export: String },

    #[error("constructing '{name}' failed: {reason}")]
    Init { name: String, reason: String },
}
