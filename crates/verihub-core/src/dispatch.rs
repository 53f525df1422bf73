//! Execution dispatch against the published registry snapshot.

use std::sync::Arc;

use thiserror::Error;

use verihub_types::manifest::CapabilityInfo;
use verihub_types::outcome::Outcome;

use crate::capability::Params;
use crate::normalize::normalize;
use crate::registry::CapabilityRegistry;

/// Dispatch-time failures. Both always propagate to the caller; there is no
/// retry and no timeout here.
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("no capability registered with name '{0}'")]
    NotFound(String),

    #[error("capability '{name}' failed")]
    Capability {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Resolves capabilities by name against the current snapshot and invokes
/// them.
///
/// Every operation captures the published snapshot exactly once at entry, so
/// a call sees one consistent registry state even when a reload publishes a
/// newer snapshot mid-call.
pub struct Dispatcher {
    registry: Arc<CapabilityRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<CapabilityRegistry>) -> Self {
        Self { registry }
    }

    /// Introspection records for every registered capability, sorted by name.
    pub fn list(&self) -> Vec<CapabilityInfo> {
        self.registry.current().infos()
    }

    /// Introspection record for one capability.
    pub fn get(&self, name: &str) -> Result<CapabilityInfo, ExecuteError> {
        self.registry
            .current()
            .get(name)
            .map(|entry| entry.info())
            .ok_or_else(|| ExecuteError::NotFound(name.to_owned()))
    }

    /// Invoke a capability and normalize whatever it returns.
    ///
    /// A failure raised by the capability itself is not swallowed: it comes
    /// back as [`ExecuteError::Capability`] with the cause preserved. A
    /// malformed-but-returned value is a normal [`Outcome`] with the error
    /// status.
    pub async fn execute(&self, name: &str, params: Params) -> Result<Outcome, ExecuteError> {
        let snapshot = self.registry.current();
        let entry = snapshot
            .get(name)
            .ok_or_else(|| ExecuteError::NotFound(name.to_owned()))?;

        tracing::debug!(capability = %name, "dispatching verification");

        let raw = entry
            .execute(params)
            .await
            .map_err(|source| ExecuteError::Capability {
                name: name.to_owned(),
                source,
            })?;

        Ok(normalize(raw))
    }
}
