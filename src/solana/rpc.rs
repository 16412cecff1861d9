//! Minimal Solana JSON-RPC client used to broadcast signed transactions.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::SolanaConfig;
use crate::error::{SignerError, SignerResult};
use crate::solana::types::{SignedTransaction, SolanaCluster};

const RPC: &str = "sendTransaction";

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC client for one cluster.
#[derive(Debug, Clone)]
pub struct SolanaRpc {
    http: reqwest::Client,
    url: String,
    preflight_commitment: String,
}

impl SolanaRpc {
    pub fn new(http: reqwest::Client, url: impl Into<String>, preflight_commitment: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            preflight_commitment: preflight_commitment.into(),
        }
    }

    /// Client for `cluster` using the configured endpoints.
    pub fn for_cluster(http: reqwest::Client, config: &SolanaConfig, cluster: SolanaCluster) -> Self {
        Self::new(http, config.rpc_url(cluster), config.preflight_commitment.clone())
    }

    /// Submit a signed transaction; returns its base58 signature.
    pub async fn send_transaction(&self, transaction: &SignedTransaction) -> SignerResult<String> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": fastrand::u32(..),
            "method": RPC,
            "params": [
                transaction.as_str(),
                {
                    "encoding": "base64",
                    "skipPreflight": false,
                    "preflightCommitment": self.preflight_commitment,
                }
            ],
        });

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SignerError::network(RPC, e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SignerError::network(RPC, e.to_string()))?;

        let parsed: RpcResponse = serde_json::from_str(&text).map_err(|_| {
            SignerError::network(RPC, format!("Unexpected response (status {}): {}", status, text))
        })?;

        if let Some(error) = parsed.error {
            return Err(SignerError::network(
                RPC,
                format!("RPC error {}: {}", error.code, error.message),
            ));
        }

        match parsed.result {
            Some(Value::String(signature)) => {
                tracing::info!(signature = %signature, rpc_url = %self.url, "Transaction broadcast");
                Ok(signature)
            }
            other => Err(SignerError::network(
                RPC,
                format!("Missing transaction signature in result: {:?}", other),
            )),
        }
    }
}
