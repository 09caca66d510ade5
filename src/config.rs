use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::env;
use std::str::FromStr;

/// Fallback transfer destination used when the `to` query parameter is absent.
pub const DEFAULT_TO: &str = "nick6zJc6HpW3kfBm4xS2dmbuVRyb5F3AnUvj5ymzR5";

/// Fallback transfer amount in whole SOL.
pub const DEFAULT_AMOUNT_SOL: f64 = 5.0;

/// Service configuration, resolved once at startup.
///
/// The RPC endpoint and its API key come from the environment; neither is
/// baked into the source. The same goes for the fallback destination and
/// amount used when the client omits query parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionConfig {
    /// HTTP listen port
    pub port: u16,

    /// Base URL of the remote Solana JSON-RPC node
    pub rpc_url: String,

    /// Optional API key, appended to the RPC URL as `api-key=...`
    #[serde(default)]
    pub rpc_api_key: Option<String>,

    /// Per-request timeout for RPC round trips (milliseconds)
    pub rpc_timeout_ms: u64,

    /// Fallback destination address when `to` is omitted
    pub default_to: String,

    /// Fallback amount in whole SOL when `amount` is omitted
    pub default_amount_sol: f64,

    /// Path of the action icon, resolved against the request origin
    pub icon_path: String,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            port: 8787,
            rpc_url: "https://api.devnet.solana.com".to_string(),
            rpc_api_key: None,
            rpc_timeout_ms: 8000,
            default_to: DEFAULT_TO.to_string(),
            default_amount_sol: DEFAULT_AMOUNT_SOL,
            icon_path: "/solana_devs.jpg".to_string(),
        }
    }
}

impl ActionConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // BLINK_PORT
        if let Ok(val) = env::var("BLINK_PORT") {
            if let Ok(num) = val.parse::<u16>() {
                config.port = num;
            }
        }

        // BLINK_RPC_URL
        if let Ok(val) = env::var("BLINK_RPC_URL") {
            if !val.trim().is_empty() {
                config.rpc_url = val.trim().to_string();
            }
        }

        // BLINK_RPC_API_KEY
        if let Ok(val) = env::var("BLINK_RPC_API_KEY") {
            if !val.trim().is_empty() {
                config.rpc_api_key = Some(val.trim().to_string());
            }
        }

        // BLINK_RPC_TIMEOUT_MS
        if let Ok(val) = env::var("BLINK_RPC_TIMEOUT_MS") {
            if let Ok(num) = val.parse::<u64>() {
                config.rpc_timeout_ms = num;
            }
        }

        // BLINK_DEFAULT_TO
        if let Ok(val) = env::var("BLINK_DEFAULT_TO") {
            if !val.trim().is_empty() {
                config.default_to = val.trim().to_string();
            }
        }

        // BLINK_DEFAULT_AMOUNT
        if let Ok(val) = env::var("BLINK_DEFAULT_AMOUNT") {
            if let Ok(num) = val.parse::<f64>() {
                config.default_amount_sol = num;
            }
        }

        // BLINK_ICON_PATH
        if let Ok(val) = env::var("BLINK_ICON_PATH") {
            if !val.trim().is_empty() {
                config.icon_path = val.trim().to_string();
            }
        }

        config
    }

    /// Validate configuration before the server starts serving
    pub fn validate(&self) -> Result<(), String> {
        if url::Url::parse(&self.rpc_url).is_err() {
            return Err(format!("Invalid RPC URL: {}", self.rpc_url));
        }

        if Pubkey::from_str(&self.default_to).is_err() {
            return Err(format!(
                "Invalid default destination address: {}",
                self.default_to
            ));
        }

        if !self.default_amount_sol.is_finite() || self.default_amount_sol <= 0.0 {
            return Err(format!(
                "Default amount must be a positive number, got {}",
                self.default_amount_sol
            ));
        }

        Ok(())
    }

    /// RPC endpoint description safe to log (does not print the key)
    pub fn masked_rpc_endpoint(&self) -> String {
        match &self.rpc_api_key {
            Some(key) if !key.is_empty() => {
                format!("{} (api-key len={})", self.rpc_url, key.len())
            }
            _ => self.rpc_url.clone(),
        }
    }
}
