//! Hot reload: filesystem watching over the module root.
//!
//! Any change under the root triggers a full rescan; the resulting snapshot
//! is published atomically. Passes are serialized and coalesced -- the
//! trigger channel holds at most one pending pass, so a burst of events
//! during an in-flight rebuild collapses into exactly one follow-up pass.
//! Readers are never blocked; they keep whatever snapshot they captured.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

// notify types come re-exported through notify-debouncer-mini so the watcher
// and the debouncer agree on the notify version.
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use tokio::sync::mpsc;

use verihub_core::catalog::CapabilityCatalog;
use verihub_core::registry::CapabilityRegistry;

use crate::scan::build_snapshot;

/// Errors starting the module watcher.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("watcher creation failed: {0}")]
    Creation(String),

    #[error("failed to watch '{path}': {reason}")]
    WatchPath { path: String, reason: String },
}

/// RAII handle that keeps the module watcher alive.
///
/// Dropping it stops the underlying debouncer; the reload task then winds
/// down once the trigger channel closes.
pub struct ReloadHandle {
    _debouncer: Debouncer<RecommendedWatcher>,
    root: PathBuf,
}

impl ReloadHandle {
    /// The module root being watched.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

impl Drop for ReloadHandle {
    fn drop(&mut self) {
        tracing::debug!(root = %self.root.display(), "module watcher dropped");
    }
}

/// Watch `root` recursively and republish the registry on every change.
///
/// Spawns the reload task on the current tokio runtime; the returned handle
/// must be kept alive for watching to continue. A rescan that fails (root
/// enumeration error) leaves the previously published snapshot in place.
pub fn watch_modules(
    root: PathBuf,
    catalog: Arc<CapabilityCatalog>,
    registry: Arc<CapabilityRegistry>,
    debounce: Duration,
) -> Result<ReloadHandle, WatchError> {
    // Capacity 1 is the coalescing contract: a full channel means a pass is
    // already pending, and that pass will observe these changes too.
    let (tx, mut rx) = mpsc::channel::<()>(1);

    let mut debouncer = new_debouncer(debounce, move |result: DebounceEventResult| match result {
        Ok(events) => {
            tracing::debug!(count = events.len(), "module tree changed");
            let _ = tx.try_send(());
        }
        Err(err) => {
            tracing::warn!(error = %err, "module watcher error");
        }
    })
    .map_err(|e| WatchError::Creation(e.to_string()))?;

    debouncer
        .watcher()
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|e| WatchError::WatchPath {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;

    tokio::spawn({
        let root = root.clone();
        async move {
            while rx.recv().await.is_some() {
                // Anything that raced in after our trigger is covered by the
                // pass we are about to run.
                while rx.try_recv().is_ok() {}

                let scan_root = root.clone();
                let scan_catalog = catalog.clone();
                let result =
                    tokio::task::spawn_blocking(move || build_snapshot(&scan_root, &scan_catalog))
                        .await;

                match result {
                    Ok(Ok(snapshot)) => {
                        tracing::info!(
                            count = snapshot.len(),
                            "module tree changed, republishing registry"
                        );
                        registry.publish(snapshot);
                    }
                    Ok(Err(err)) => {
                        tracing::warn!(error = %err, "rescan failed, keeping previous snapshot");
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "rescan task failed");
                    }
                }
            }
            tracing::debug!("reload task stopped");
        }
    });

    tracing::info!(root = %root.display(), "module watcher started");
    Ok(ReloadHandle {
        _debouncer: debouncer,
        root,
    })
}
