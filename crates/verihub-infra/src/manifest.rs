//! Reading `manifest.json` from a module directory.

use std::path::Path;

use verihub_types::error::ManifestError;
use verihub_types::manifest::Manifest;

/// Read and validate the manifest of one module directory.
///
/// Pure read: no side effects beyond the filesystem access. Structural
/// validation only -- `name` and `path` must be present and non-empty;
/// parameter declarations must be an array of objects but their `type` tags
/// are passed through uninterpreted.
pub fn read_manifest(dir: &Path) -> Result<Manifest, ManifestError> {
    let manifest_path = dir.join("manifest.json");
    if !manifest_path.exists() {
        return Err(ManifestError::Missing(dir.to_path_buf()));
    }

    let content = std::fs::read_to_string(&manifest_path).map_err(|e| ManifestError::Io {
        path: manifest_path.clone(),
        reason: e.to_string(),
    })?;

    let manifest: Manifest =
        serde_json::from_str(&content).map_err(|e| ManifestError::Parse {
            path: manifest_path.clone(),
            reason: e.to_string(),
        })?;

    if manifest.name.trim().is_empty() {
        return Err(ManifestError::MissingField("name"));
    }
    if manifest.path.trim().is_empty() {
        return Err(ManifestError::MissingField("path"));
    }

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write_manifest(dir: &Path, content: &str) {
        std::fs::write(dir.join("manifest.json"), content).unwrap();
    }

    #[test]
    fn reads_a_valid_manifest() {
        let tmp = TempDir::new().unwrap();
        write_manifest(
            tmp.path(),
            r#"{
                "name": "DiscordJoinVerification",
                "description": "Checks guild membership",
                "path": "./discord_join",
                "parameters": [{ "name": "guild_id", "type": "string", "required": true }]
            }"#,
        );

        let manifest = read_manifest(tmp.path()).unwrap();
        assert_eq!(manifest.name, "DiscordJoinVerification");
        assert_eq!(manifest.path, "./discord_join");
        assert_eq!(manifest.parameters.len(), 1);
    }

    #[test]
    fn missing_file_is_its_own_error() {
        let tmp = TempDir::new().unwrap();
        let err = read_manifest(tmp.path()).unwrap_err();
        assert!(matches!(err, ManifestError::Missing(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), "{ not json");
        let err = read_manifest(tmp.path()).unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn absent_name_field_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), r#"{ "path": "./x" }"#);
        let err = read_manifest(tmp.path()).unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn empty_name_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), r#"{ "name": "  ", "path": "./x" }"#);
        let err = read_manifest(tmp.path()).unwrap_err();
        assert!(matches!(err, ManifestError::MissingField("name")));
    }

    #[test]
    fn empty_entry_path_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write_manifest(tmp.path(), r#"{ "name": "X", "path": "" }"#);
        let err = read_manifest(tmp.path()).unwrap_err();
        assert!(matches!(err, ManifestError::MissingField("path")));
    }
}
