//! Service configuration loader.
//!
//! Reads `config.toml` and deserializes it into [`ServiceConfig`]. Falls
//! back to defaults when the file is missing or malformed; CLI flags
//! override whatever was loaded.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Runtime configuration for the Verihub service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Root directory scanned for verification modules.
    #[serde(default = "default_modules_dir")]
    pub modules_dir: PathBuf,
    /// Filesystem watcher debounce window in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8085".to_owned()
}

fn default_modules_dir() -> PathBuf {
    PathBuf::from("modules")
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            modules_dir: default_modules_dir(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Load service configuration from a `config.toml` path.
///
/// - Missing file: returns [`ServiceConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(config_path: &Path) -> ServiceConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config at {}, using defaults", config_path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServiceConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn missing_file_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).await;
        assert_eq!(config.bind_addr, "127.0.0.1:8085");
        assert_eq!(config.modules_dir, PathBuf::from("modules"));
        assert_eq!(config.debounce_ms, 500);
    }

    #[tokio::test]
    async fn valid_toml_is_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(
            &path,
            r#"
bind_addr = "0.0.0.0:9090"
modules_dir = "/srv/verihub/modules"
debounce_ms = 250
"#,
        )
        .await
        .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.bind_addr, "0.0.0.0:9090");
        assert_eq!(config.modules_dir, PathBuf::from("/srv/verihub/modules"));
        assert_eq!(config.debounce_ms, 250);
    }

    #[tokio::test]
    async fn partial_toml_fills_in_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(&path, r#"bind_addr = "0.0.0.0:9090""#)
            .await
            .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.bind_addr, "0.0.0.0:9090");
        assert_eq!(config.debounce_ms, 500);
    }

    #[tokio::test]
    async fn invalid_toml_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(&path).await;
        assert_eq!(config.bind_addr, "127.0.0.1:8085");
    }
}
