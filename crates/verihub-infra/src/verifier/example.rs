//! Template verification module.
//!
//! The earliest generation of the capability contract: no network calls,
//! plain boolean return. Kept as a scaffold for new modules and as a live
//! smoke check for the dispatch path.

use serde_json::Value;

use verihub_core::capability::{Capability, Params};

pub struct ExampleVerification;

impl Capability for ExampleVerification {
    async fn execute(&self, params: Params) -> anyhow::Result<Value> {
        tracing::debug!(params = %serde_json::Value::Object(params), "running example verification");
        Ok(Value::Bool(true))
    }
}
