//! Free-form judgment relayed through an external judge endpoint.
//!
//! Posts a question and a text to the judge service configured via
//! `VERIHUB_JUDGE_URL` and relays its verdict. The judge answers in the
//! legacy `{result, comment}` shape, and a well-formed verdict is passed
//! through verbatim; everything else degrades to a
//! `{result: false, message}` explanation.

use std::time::Duration;

use serde_json::{json, Value};

use verihub_core::capability::{Capability, Params};

pub struct RemoteJudgment {
    client: reqwest::Client,
}

impl RemoteJudgment {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }
}

impl Capability for RemoteJudgment {
    async fn execute(&self, params: Params) -> anyhow::Result<Value> {
        let question = params.get("question").and_then(Value::as_str);
        let text = params.get("text").and_then(Value::as_str);
        let (Some(question), Some(text)) = (question, text) else {
            return Ok(json!({
                "result": false,
                "message": "Missing required parameters: question, text"
            }));
        };

        let Ok(judge_url) = std::env::var("VERIHUB_JUDGE_URL") else {
            return Ok(json!({
                "result": false,
                "message": "VERIHUB_JUDGE_URL not set in environment variables"
            }));
        };

        let response = match self
            .client
            .post(&judge_url)
            .json(&json!({ "question": question, "text": text }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "judge request failed");
                return Ok(json!({
                    "result": false,
                    "message": format!("Error during communication with judge endpoint: {err}")
                }));
            }
        };

        if !response.status().is_success() {
            return Ok(json!({
                "result": false,
                "message": format!(
                    "Failed to send request to judge endpoint. Status: {}",
                    response.status().as_u16()
                )
            }));
        }

        let verdict: Value = match response.json().await {
            Ok(verdict) => verdict,
            Err(_) => {
                return Ok(json!({
                    "result": false,
                    "message": "Response from judge endpoint is not valid JSON."
                }));
            }
        };

        // The judge must answer {result: bool, comment: string}; relay a
        // well-formed verdict untouched.
        let well_formed = verdict.get("result").is_some_and(Value::is_boolean)
            && verdict.get("comment").is_some_and(Value::is_string);
        if well_formed {
            Ok(verdict)
        } else {
            Ok(json!({
                "result": false,
                "message": "Invalid verdict structure from judge endpoint."
            }))
        }
    }
}
