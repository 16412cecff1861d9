//! Signer request types, modes and flow states.

use serde::{Deserialize, Serialize};
use solana_sdk::transaction::VersionedTransaction;
use std::str::FromStr;

use crate::error::SignerError;
use crate::network::Chain;
use crate::solana::{SolanaCluster, UnsignedTransaction};

/// Which strategy produces the signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SigningMode {
    /// The network signs with the encrypted key; key material never leaves it.
    #[default]
    Native,
    /// The key is exported and the transaction signed locally.
    LocalExport,
}

impl SigningMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningMode::Native => "native",
            SigningMode::LocalExport => "local-export",
        }
    }
}

impl std::fmt::Display for SigningMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SigningMode {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" => Ok(SigningMode::Native),
            "local-export" => Ok(SigningMode::LocalExport),
            other => Err(SignerError::InvalidInput(format!(
                "Unknown signing mode '{}' (expected native or local-export)",
                other
            ))),
        }
    }
}

/// Everything the signing entry point needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignRequest {
    /// Hex public key of the PKP that owns the wrapped key.
    pub pkp_public_key: String,
    pub chain: Chain,
    /// Wrapped key identifier.
    pub key_id: String,
    pub transaction: UnsignedTransaction,
    /// Submit the signed transaction to the cluster.
    pub broadcast: bool,
}

/// Payload fields extracted by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPayload<'a> {
    pub serialized_transaction: &'a str,
    pub cluster: SolanaCluster,
}

/// Decoded transaction ready for a strategy.
#[derive(Debug, Clone)]
pub struct PreparedTransaction {
    pub key_id: String,
    pub cluster: SolanaCluster,
    pub transaction: VersionedTransaction,
}

/// Progress of one signing flow.
///
/// ```text
/// Init → Connected → Authenticated → TransactionValidated → Signed → [Broadcast] → Disconnected
/// ```
/// Any failure after connecting goes straight to `Disconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Init,
    Connected,
    Authenticated,
    TransactionValidated,
    Signed,
    Broadcast,
    Disconnected,
}

impl FlowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowState::Init => "init",
            FlowState::Connected => "connected",
            FlowState::Authenticated => "authenticated",
            FlowState::TransactionValidated => "transaction_validated",
            FlowState::Signed => "signed",
            FlowState::Broadcast => "broadcast",
            FlowState::Disconnected => "disconnected",
        }
    }
}

impl std::fmt::Display for FlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
