//! Application state wiring the registry, watcher, and dispatcher together.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;

use verihub_core::dispatch::Dispatcher;
use verihub_core::registry::CapabilityRegistry;
use verihub_infra::config::ServiceConfig;
use verihub_infra::scan::build_snapshot;
use verihub_infra::verifier::builtin_catalog;
use verihub_infra::watcher::{watch_modules, ReloadHandle};

/// Shared application state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    /// Run the initial module scan, publish the first snapshot, and start
    /// the hot-reload watcher.
    ///
    /// The returned [`ReloadHandle`] must stay alive for as long as the
    /// server runs; dropping it stops hot reload.
    pub fn init(config: &ServiceConfig) -> anyhow::Result<(Self, ReloadHandle)> {
        let catalog = Arc::new(builtin_catalog());
        let registry = Arc::new(CapabilityRegistry::new());

        let snapshot = build_snapshot(&config.modules_dir, &catalog).with_context(|| {
            format!(
                "failed to scan module directory {}",
                config.modules_dir.display()
            )
        })?;
        tracing::info!(count = snapshot.len(), "initial module scan complete");
        registry.publish(snapshot);

        let reload = watch_modules(
            config.modules_dir.clone(),
            catalog,
            registry.clone(),
            Duration::from_millis(config.debounce_ms),
        )?;

        let state = Self {
            dispatcher: Arc::new(Dispatcher::new(registry)),
        };
        Ok((state, reload))
    }
}
