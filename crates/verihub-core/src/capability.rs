//! The capability contract and its object-safe boxed wrapper.
//!
//! `Capability` uses RPITIT, so it cannot be a trait object directly. The
//! boxing follows the usual three-step pattern:
//! 1. Define an object-safe `CapabilityDyn` trait with boxed futures
//! 2. Blanket-impl `CapabilityDyn` for all `T: Capability`
//! 3. `BoxCapability` wraps `Box<dyn CapabilityDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use serde_json::{Map, Value};

/// The caller-supplied parameter map for one invocation.
pub type Params = Map<String, Value>;

/// A verification capability: one independently loadable unit of executable
/// verification logic.
///
/// Implementations typically perform their own network calls against
/// third-party services and may suspend for the duration of the call. The
/// return value is deliberately untyped -- module generations have returned
/// a plain boolean, `{result, comment}`, and `{result, message, data}`
/// objects, and the dispatch layer reconciles all of them.
pub trait Capability: Send + Sync {
    /// Run the verification with the given parameters.
    fn execute(&self, params: Params) -> impl Future<Output = anyhow::Result<Value>> + Send;
}

/// Object-safe version of [`Capability`] with boxed futures.
///
/// Exists solely to enable dynamic dispatch; a blanket implementation covers
/// every `Capability`.
pub trait CapabilityDyn: Send + Sync {
    fn execute_boxed(
        &self,
        params: Params,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Value>> + Send + '_>>;
}

impl<T: Capability> CapabilityDyn for T {
    fn execute_boxed(
        &self,
        params: Params,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<Value>> + Send + '_>> {
        Box::pin(self.execute(params))
    }
}

/// Type-erased capability held by registry entries.
pub struct BoxCapability {
    inner: Box<dyn CapabilityDyn + Send + Sync>,
}

impl BoxCapability {
    /// Wrap a concrete `Capability` in a type-erased box.
    pub fn new<T: Capability + 'static>(capability: T) -> Self {
        Self {
            inner: Box::new(capability),
        }
    }

    /// Run the verification with the given parameters.
    pub async fn execute(&self, params: Params) -> anyhow::Result<Value> {
        self.inner.execute_boxed(params).await
    }
}

impl std::fmt::Debug for BoxCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BoxCapability")
    }
}
