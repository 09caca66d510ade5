//! JSON-RPC client for the remote Solana node.
//!
//! One request, one round trip: a failed or stalled call fails the whole
//! HTTP request it serves. No retries, no fallback endpoints.

use anyhow::{anyhow, Result};
use reqwest::Client;
use solana_sdk::hash::Hash;
use std::str::FromStr;
use std::time::Duration;

use crate::config::ActionConfig;

pub struct RpcClient {
    pub endpoint: String,
    pub http: Client,
}

impl RpcClient {
    /// Build the client from config, appending the API key to the endpoint
    /// URL when one is configured.
    pub fn new(cfg: &ActionConfig) -> Result<Self> {
        let mut endpoint = url::Url::parse(&cfg.rpc_url)?;
        if let Some(key) = cfg.rpc_api_key.as_deref().filter(|k| !k.is_empty()) {
            endpoint.query_pairs_mut().append_pair("api-key", key);
        }

        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.rpc_timeout_ms))
            .build()?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            http,
        })
    }

    /// Single JSON-RPC 2.0 round trip, returning the `result` member
    async fn call(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let resp = self.http.post(&self.endpoint).json(&body).send().await?;

        if !resp.status().is_success() {
            tracing::warn!(
                method = method,
                status = %resp.status(),
                "RPC endpoint returned error status"
            );
            return Err(anyhow!("RPC endpoint returned status {}", resp.status()));
        }

        let json: serde_json::Value = resp.json().await?;

        if let Some(err) = json.get("error") {
            if !err.is_null() {
                tracing::warn!(method = method, error = %err, "RPC returned error response");
                return Err(anyhow!("RPC error: {}", err));
            }
        }

        Ok(json["result"].clone())
    }

    /// Minimum lamport balance for an account of `data_len` bytes to stay
    /// rent exempt.
    pub async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        let result = self
            .call(
                "getMinimumBalanceForRentExemption",
                serde_json::json!([data_len]),
            )
            .await?;

        result
            .as_u64()
            .ok_or_else(|| anyhow!("malformed rent exemption response: {}", result))
    }

    /// Latest blockhash, anchoring a transaction's validity window
    pub async fn get_latest_blockhash(&self) -> Result<Hash> {
        let result = self.call("getLatestBlockhash", serde_json::json!([])).await?;

        let blockhash = result["value"]["blockhash"]
            .as_str()
            .ok_or_else(|| anyhow!("malformed blockhash response: {}", result))?;

        Hash::from_str(blockhash).map_err(|e| anyhow!("invalid blockhash {}: {}", blockhash, e))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActionConfig;

    async fn test_client() -> RpcClient {
        let config = ActionConfig {
            rpc_url: test_node::spawn().await,
            ..Default::default()
        };
        RpcClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_rent_exemption_query() {
        let client = test_client().await;
        let minimum = client.get_minimum_balance_for_rent_exemption(0).await.unwrap();
        assert_eq!(minimum, test_node::MIN_RENT_EXEMPT);
    }

    #[tokio::test]
    async fn test_latest_blockhash_query() {
        let client = test_client().await;
        let blockhash = client.get_latest_blockhash().await.unwrap();
        assert_eq!(blockhash, Hash::from_str(test_node::BLOCKHASH).unwrap());
    }

    #[tokio::test]
    async fn test_rpc_error_member_surfaces_as_err() {
        let client = test_client().await;
        let err = client.call("getNoSuchMethod", serde_json::json!([])).await;
        assert!(err.is_err());
        assert!(err.unwrap_err().to_string().contains("RPC error"));
    }

    #[test]
    fn test_api_key_is_appended_to_endpoint() {
        let config = ActionConfig {
            rpc_url: "https://devnet.example.com/".to_string(),
            rpc_api_key: Some("abc123".to_string()),
            ..Default::default()
        };
        let client = RpcClient::new(&config).unwrap();
        assert!(client.endpoint.contains("api-key=abc123"));
    }

    #[test]
    fn test_no_key_leaves_endpoint_untouched() {
        let config = ActionConfig::default();
        let client = RpcClient::new(&config).unwrap();
        assert!(!client.endpoint.contains("api-key"));
    }
}
