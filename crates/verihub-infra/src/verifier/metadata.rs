//! Pool metadata validation.
//!
//! Fetches the metadata JSON document a registrant hosts at `meta_url` and
//! checks it against the registration standards: required string fields, a
//! 3-5 character uppercase ticker, and well-formed homepage/extended URLs.
//! Returns a plain `true` when the document is valid and a
//! `{result: false, message}` object naming the first violation otherwise.

use std::time::Duration;

use reqwest::Url;
use serde_json::{json, Value};

use verihub_core::capability::{Capability, Params};

const REQUIRED_FIELDS: [&str; 4] = ["name", "ticker", "description", "homepage"];

pub struct MetadataValidation {
    client: reqwest::Client,
}

impl MetadataValidation {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self { client })
    }

    fn validate(metadata: &Value) -> Option<String> {
        for field in REQUIRED_FIELDS {
            match metadata.get(field) {
                None | Some(Value::Null) => {
                    return Some(format!("Missing required field: {field}"));
                }
                Some(value) if !value.is_string() => {
                    return Some(format!("Field {field} must be a string"));
                }
                _ => {}
            }
        }

        let ticker = metadata["ticker"].as_str().unwrap_or_default();
        if ticker.len() < 3 || ticker.len() > 5 {
            return Some(format!(
                "Ticker must be between 3 and 5 characters. Provided ticker: {ticker}"
            ));
        }
        if !ticker.chars().all(|c| c.is_ascii_uppercase()) {
            return Some(format!(
                "Ticker must contain only uppercase letters. Provided ticker: {ticker}"
            ));
        }

        let homepage = metadata["homepage"].as_str().unwrap_or_default();
        if Url::parse(homepage).is_err() {
            return Some(format!("Homepage is not a valid URL: {homepage}"));
        }

        if let Some(extended) = metadata.get("extended") {
            let Some(extended) = extended.as_str() else {
                return Some("Field extended must be a string if provided".to_owned());
            };
            if Url::parse(extended).is_err() {
                return Some(format!("Extended is not a valid URL: {extended}"));
            }
        }

        if metadata["name"].as_str().unwrap_or_default().trim().is_empty() {
            return Some("Field name cannot be empty".to_owned());
        }
        if metadata["description"]
            .as_str()
            .unwrap_or_default()
            .trim()
            .is_empty()
        {
            return Some("Field description cannot be empty".to_owned());
        }

        None
    }
}

impl Capability for MetadataValidation {
    async fn execute(&self, params: Params) -> anyhow::Result<Value> {
        let Some(meta_url) = params.get("meta_url").and_then(Value::as_str) else {
            return Ok(json!({
                "result": false,
                "message": "Missing required parameter: meta_url"
            }));
        };

        let response = match self.client.get(meta_url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(url = %meta_url, error = %err, "metadata fetch failed");
                return Ok(json!({
                    "result": false,
                    "message": format!("Error during metadata validation: {err}")
                }));
            }
        };

        if !response.status().is_success() {
            return Ok(json!({
                "result": false,
                "message": format!(
                    "Failed to fetch metadata from {meta_url}. Status: {}",
                    response.status().as_u16()
                )
            }));
        }

        let metadata: Value = match response.json().await {
            Ok(metadata) => metadata,
            Err(err) => {
                return Ok(json!({
                    "result": false,
                    "message": format!("Error during metadata validation: {err}")
                }));
            }
        };

        match Self::validate(&metadata) {
            Some(violation) => {
                tracing::debug!(url = %meta_url, %violation, "metadata rejected");
                Ok(json!({ "result": false, "message": violation }))
            }
            None => {
                tracing::debug!(url = %meta_url, "metadata is valid");
                Ok(Value::Bool(true))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_metadata() -> Value {
        json!({
            "name": "Apex Pool",
            "ticker": "APEX",
            "description": "A community stake pool",
            "homepage": "https://apexpool.example.com"
        })
    }

    #[test]
    fn accepts_valid_metadata() {
        assert_eq!(MetadataValidation::validate(&valid_metadata()), None);
    }

    #[test]
    fn rejects_missing_field() {
        let mut metadata = valid_metadata();
        metadata.as_object_mut().unwrap().remove("ticker");
        assert_eq!(
            MetadataValidation::validate(&metadata),
            Some("Missing required field: ticker".to_owned())
        );
    }

    #[test]
    fn rejects_non_string_field() {
        let mut metadata = valid_metadata();
        metadata["homepage"] = json!(42);
        assert_eq!(
            MetadataValidation::validate(&metadata),
            Some("Field homepage must be a string".to_owned())
        );
    }

    #[test]
    fn rejects_short_and_long_tickers() {
        let mut metadata = valid_metadata();
        metadata["ticker"] = json!("AB");
        assert!(MetadataValidation::validate(&metadata)
            .unwrap()
            .contains("between 3 and 5"));

        metadata["ticker"] = json!("TOOLONG");
        assert!(MetadataValidation::validate(&metadata)
            .unwrap()
            .contains("between 3 and 5"));
    }

    #[test]
    fn rejects_lowercase_ticker() {
        let mut metadata = valid_metadata();
        metadata["ticker"] = json!("apex");
        assert!(MetadataValidation::validate(&metadata)
            .unwrap()
            .contains("only uppercase"));
    }

    #[test]
    fn rejects_invalid_homepage() {
        let mut metadata = valid_metadata();
        metadata["homepage"] = json!("not a url");
        assert!(MetadataValidation::validate(&metadata)
            .unwrap()
            .contains("not a valid URL"));
    }

    #[test]
    fn rejects_invalid_extended_url() {
        let mut metadata = valid_metadata();
        metadata["extended"] = json!("also not a url");
        assert!(MetadataValidation::validate(&metadata)
            .unwrap()
            .contains("Extended is not a valid URL"));
    }

    #[test]
    fn rejects_blank_name() {
        let mut metadata = valid_metadata();
        metadata["name"] = json!("   ");
        assert_eq!(
            MetadataValidation::validate(&metadata),
            Some("Field name cannot be empty".to_owned())
        );
    }

    #[tokio::test]
    async fn missing_meta_url_parameter_fails_validation() {
        let module = MetadataValidation::new().unwrap();
        let value = module.execute(Params::new()).await.unwrap();
        assert_eq!(value["result"], false);
        assert_eq!(value["message"], "Missing required parameter: meta_url");
    }
}
