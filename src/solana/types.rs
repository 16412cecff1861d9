//! Solana-side data types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SignerError;

/// Solana cluster a transaction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolanaCluster {
    #[serde(rename = "mainnet-beta")]
    MainnetBeta,
    #[serde(rename = "devnet")]
    Devnet,
    #[serde(rename = "testnet")]
    Testnet,
}

impl SolanaCluster {
    pub const ALL: [SolanaCluster; 3] = [
        SolanaCluster::MainnetBeta,
        SolanaCluster::Devnet,
        SolanaCluster::Testnet,
    ];

    /// Cluster tag as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SolanaCluster::MainnetBeta => "mainnet-beta",
            SolanaCluster::Devnet => "devnet",
            SolanaCluster::Testnet => "testnet",
        }
    }

    /// Prefix of the matching `*_rpc_url` settings key.
    pub fn config_key(&self) -> &'static str {
        match self {
            SolanaCluster::MainnetBeta => "mainnet",
            SolanaCluster::Devnet => "devnet",
            SolanaCluster::Testnet => "testnet",
        }
    }
}

impl std::fmt::Display for SolanaCluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolanaCluster {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet-beta" | "mainnet" => Ok(SolanaCluster::MainnetBeta),
            "devnet" => Ok(SolanaCluster::Devnet),
            "testnet" => Ok(SolanaCluster::Testnet),
            other => Err(SignerError::InvalidInput(format!(
                "Unknown Solana cluster '{}'",
                other
            ))),
        }
    }
}

/// Unsigned transaction payload as handed to the signer.
///
/// Both fields are optional on the wire; the signer rejects payloads missing
/// either one before touching the network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTransaction {
    /// Base64 wire-format transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serialized_transaction: Option<String>,

    /// Cluster tag ("mainnet-beta", "devnet", "testnet").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
}

impl UnsignedTransaction {
    pub fn new(serialized_transaction: impl Into<String>, cluster: SolanaCluster) -> Self {
        Self {
            serialized_transaction: Some(serialized_transaction.into()),
            chain: Some(cluster.as_str().to_string()),
        }
    }
}

/// A signed transaction, base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedTransaction(String);

impl SignedTransaction {
    pub fn new(base64: impl Into<String>) -> Self {
        Self(base64.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SignedTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
