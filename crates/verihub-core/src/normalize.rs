//! Return-shape normalization.
//!
//! Verification modules were written across several generations of the
//! capability contract and return three incompatible shapes:
//!
//! - a plain boolean (the earliest modules),
//! - `{result: bool, comment: string}` (the LLM-backed modules),
//! - `{result: bool, message: string, ...}` (the current generation, which
//!   may attach arbitrary extra fields).
//!
//! All of them are first-class; [`normalize`] reduces each to an
//! [`Outcome`] by shape, in a fixed precedence order, so nothing downstream
//! ever special-cases a module.

use serde_json::{Map, Value};

use verihub_types::outcome::{Outcome, OutcomeStatus};

/// Reduce a raw module return value to the canonical outcome.
///
/// Precedence:
/// 1. boolean -> pass/fail with an empty message
/// 2. object with `result: bool` and `message: string` -> pass/fail, message,
///    remaining keys preserved as `data`
/// 3. object with `result: bool` and `comment: string` -> same, message taken
///    from `comment`
/// 4. any other object -> `Error` with the object serialized into the message
/// 5. any other value -> `Error` with the value stringified (strings are
///    taken verbatim, everything else as compact JSON)
pub fn normalize(raw: Value) -> Outcome {
    match raw {
        Value::Bool(pass) => Outcome {
            status: status_from(pass),
            message: String::new(),
            data: None,
        },
        Value::Object(fields) => normalize_object(fields),
        other => error_outcome(other),
    }
}

fn normalize_object(mut fields: Map<String, Value>) -> Outcome {
    let Some(pass) = fields.get("result").and_then(Value::as_bool) else {
        return error_outcome(Value::Object(fields));
    };

    let message_key = if fields.get("message").is_some_and(Value::is_string) {
        "message"
    } else if fields.get("comment").is_some_and(Value::is_string) {
        "comment"
    } else {
        return error_outcome(Value::Object(fields));
    };

    fields.remove("result");
    let message = match fields.remove(message_key) {
        Some(Value::String(s)) => s,
        _ => unreachable!("message key checked above"),
    };

    Outcome {
        status: status_from(pass),
        message,
        data: if fields.is_empty() {
            None
        } else {
            Some(fields)
        },
    }
}

fn status_from(pass: bool) -> OutcomeStatus {
    if pass {
        OutcomeStatus::Success
    } else {
        OutcomeStatus::ValidationFailed
    }
}

fn error_outcome(value: Value) -> Outcome {
    let message = match value {
        Value::String(s) => s,
        other => other.to_string(),
    };
    Outcome {
        status: OutcomeStatus::Error,
        message,
        data: None,
    }
}
