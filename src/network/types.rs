//! Request and response shapes exchanged with the signing network.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::SignerError;
use crate::solana::UnsignedTransaction;

/// Resource prefix for action-execution capabilities.
pub const LIT_ACTION_RESOURCE_PREFIX: &str = "lit-litaction";

/// Ability that allows executing actions on the network.
pub const LIT_ACTION_EXECUTION: &str = "lit-action-execution";

/// Chain family a wrapped key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Evm,
    Solana,
}

impl Chain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Evm => "evm",
            Chain::Solana => "solana",
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "evm" => Ok(Chain::Evm),
            "solana" => Ok(Chain::Solana),
            other => Err(SignerError::InvalidInput(format!("Unknown chain '{}'", other))),
        }
    }
}

/// Signature by the account over a sign-in message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSig {
    pub sig: String,
    pub derived_via: String,
    pub signed_message: String,
    pub address: String,
}

/// A single capability: an ability over a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAbilityRequest {
    pub resource_prefix: String,
    pub resource: String,
    pub ability: String,
}

impl ResourceAbilityRequest {
    /// Permission to execute actions on `resource` ("*" for any).
    pub fn action_execution(resource: impl Into<String>) -> Self {
        Self {
            resource_prefix: LIT_ACTION_RESOURCE_PREFIX.to_string(),
            resource: resource.into(),
            ability: LIT_ACTION_EXECUTION.to_string(),
        }
    }

    /// Resource URI listed in the sign-in message.
    pub fn resource_uri(&self) -> String {
        format!("{}://{}", self.resource_prefix, self.resource)
    }
}

/// Request for session signatures on behalf of a PKP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSigsRequest {
    pub pkp_public_key: String,
    pub auth_sig: AuthSig,
    pub resource_ability_requests: Vec<ResourceAbilityRequest>,
    pub expiration: DateTime<Utc>,
}

/// One node's signed grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSig {
    pub sig: String,
    pub derived_via: String,
    pub signed_message: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algo: Option<String>,
}

/// Short-lived, capability-scoped session credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSigs {
    /// Grants keyed by node URL.
    pub signatures: BTreeMap<String, SessionSig>,
    pub expiration: DateTime<Utc>,
    pub capabilities: Vec<ResourceAbilityRequest>,
}

impl SessionSigs {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration <= now
    }

    pub fn grants(&self, capability: &ResourceAbilityRequest) -> bool {
        self.capabilities.iter().any(|granted| granted == capability)
    }
}

/// Programmable key pair: the on-chain identity that owns wrapped keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pkp {
    pub token_id: String,
    /// Uncompressed secp256k1 public key, hex.
    pub public_key: String,
    pub eth_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintPkpRequest {
    pub auth_sig: AuthSig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKeyRequest {
    pub network: Chain,
    pub memo: String,
}

/// Reference to key material held by the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedKey {
    pub id: String,
    pub generated_public_key: String,
    pub pkp_address: String,
    pub network: Chain,
    #[serde(default)]
    pub memo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportKeyRequest {
    pub id: String,
    pub network: Chain,
}

/// Decrypted key material. Never logged.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedKey {
    pub id: String,
    pub decrypted_private_key: String,
    pub public_key: String,
    pub key_type: String,
}

impl std::fmt::Debug for ExportedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportedKey")
            .field("id", &self.id)
            .field("decrypted_private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("key_type", &self.key_type)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignTransactionRequest {
    pub id: String,
    pub network: Chain,
    pub unsigned_transaction: UnsignedTransaction,
    pub broadcast: bool,
}
