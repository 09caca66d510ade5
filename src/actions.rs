//! Solana Actions wire types.
//!
//! The GET side advertises the action (title, icon, input fields); the POST
//! side carries the caller's account in and a serialized unsigned
//! transaction back out.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use solana_sdk::transaction::Transaction;

/// Action descriptor returned on discovery (GET/OPTIONS)
#[derive(Debug, Clone, Serialize)]
pub struct ActionGetResponse {
    pub title: String,
    pub icon: String,
    pub description: String,
    pub label: String,
    pub links: ActionLinks,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionLinks {
    pub actions: Vec<LinkedAction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkedAction {
    pub label: String,
    pub href: String,
    pub parameters: Vec<ActionParameter>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionParameter {
    pub name: String,
    pub label: String,
    pub required: bool,
}

/// POST body: the account that will sign and pay for the transaction
#[derive(Debug, Deserialize)]
pub struct ActionPostRequest {
    pub account: String,
}

/// POST response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionPostResponse {
    /// Base64-encoded serialized unsigned transaction
    pub transaction: String,
    /// Human-readable description of what signing will do
    pub message: String,
}

impl ActionPostResponse {
    /// Serialize an unsigned transaction into the response envelope
    pub fn new(transaction: &Transaction, message: String) -> Result<Self> {
        let bytes = bincode::serialize(transaction).context("failed to serialize transaction")?;
        Ok(Self {
            transaction: STANDARD.encode(bytes),
            message,
        })
    }
}
