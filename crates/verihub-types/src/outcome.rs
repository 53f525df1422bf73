//! The canonical verification outcome.
//!
//! Whatever shape a module's `execute` returns, the dispatch layer reduces it
//! to this one record before handing it to callers. Construction happens in
//! `verihub_core::normalize` and nowhere else.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a verification concluded.
///
/// - `Success`: the check ran and passed.
/// - `ValidationFailed`: the check ran and the condition did not hold.
/// - `Error`: the module returned something the outcome contract does not
///   recognize. The invocation itself still completed, so this is a normal
///   result, not a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    ValidationFailed,
    Error,
}

/// The canonical result of invoking a verification capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub status: OutcomeStatus,
    pub message: String,
    /// Any extra fields the module returned beyond the recognized ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}
