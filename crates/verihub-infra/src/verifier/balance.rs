//! Minimum-balance check against a chain explorer.
//!
//! Looks up an address through the explorer's `address_info` endpoint and
//! compares the balance against a caller-supplied minimum. Answers in the
//! current `{result, message, ...}` shape with the comparison details as
//! extra fields. A transport failure toward the explorer is a real error
//! and propagates to the dispatcher.

use std::time::Duration;

use anyhow::Context as _;
use serde_json::{json, Value};

use verihub_core::capability::{Capability, Params};

const DEFAULT_MAINNET_URL: &str = "https://explorer.mainnet.apexfusion.org/api/v1";
const DEFAULT_TESTNET_URL: &str = "https://explorer.testnet.apexfusion.org/api/v1";

const DEFAULT_MINIMUM_LOVELACE: u64 = 1_000_000;

pub struct AccountBalanceCheck {
    client: reqwest::Client,
}

impl AccountBalanceCheck {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self { client })
    }

    fn base_url(network: &str) -> String {
        match network {
            "mainnet" => std::env::var("VERIHUB_EXPLORER_MAINNET_URL")
                .unwrap_or_else(|_| DEFAULT_MAINNET_URL.to_owned()),
            _ => std::env::var("VERIHUB_EXPLORER_TESTNET_URL")
                .unwrap_or_else(|_| DEFAULT_TESTNET_URL.to_owned()),
        }
    }

    async fn fetch_balance(&self, network: &str, address: &str) -> anyhow::Result<u64> {
        let url = format!("{}/address_info", Self::base_url(network));
        let response = self
            .client
            .post(&url)
            .json(&json!({ "_addresses": [address] }))
            .send()
            .await
            .context("explorer request failed")?;

        // An unknown address is an empty result, not an error.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(0);
        }
        let response = response
            .error_for_status()
            .context("explorer returned an error status")?;

        let info: Value = response
            .json()
            .await
            .context("explorer returned invalid JSON")?;

        let balance = info
            .get(0)
            .and_then(|entry| entry.get("balance"))
            .and_then(Value::as_str)
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(0);

        Ok(balance)
    }
}

impl Capability for AccountBalanceCheck {
    async fn execute(&self, params: Params) -> anyhow::Result<Value> {
        let Some(address) = params.get("address").and_then(Value::as_str) else {
            return Ok(json!({
                "result": false,
                "message": "Address parameter is required"
            }));
        };

        if !address.starts_with("addr1") {
            return Ok(json!({
                "result": false,
                "message": "Invalid address format. Address must start with 'addr1'"
            }));
        }

        let network = params
            .get("network")
            .and_then(Value::as_str)
            .unwrap_or("mainnet");
        if network != "mainnet" && network != "testnet" {
            return Ok(json!({
                "result": false,
                "message": "Invalid network. Must be 'mainnet' or 'testnet'"
            }));
        }

        let minimum = match params.get("minimum_lovelace") {
            None => DEFAULT_MINIMUM_LOVELACE,
            Some(value) => match value.as_u64() {
                Some(minimum) => minimum,
                None => {
                    return Ok(json!({
                        "result": false,
                        "message": "Invalid minimum balance. Must be a non-negative integer"
                    }));
                }
            },
        };

        let balance = self.fetch_balance(network, address).await?;
        let has_minimum = balance >= minimum;

        tracing::debug!(%address, balance, minimum, network, "balance check complete");

        Ok(json!({
            "result": has_minimum,
            "message": if has_minimum {
                format!("Address holds {balance} lovelace, meeting the minimum of {minimum}")
            } else {
                format!("Address holds {balance} lovelace, below the minimum of {minimum}")
            },
            "address": address,
            "balance_lovelace": balance,
            "minimum_lovelace": minimum,
            "network": network,
        }))
    }
}
