//! Account wallet used to authenticate against the signing network.
//!
//! # Security
//! - The private key comes from [`AppConfig`] only, never from the environment directly
//! - Keys are never logged or serialized

use alloy::hex;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;

use crate::account::auth::AuthMessage;
use crate::config::AppConfig;
use crate::error::{SignerError, SignerResult};
use crate::network::types::AuthSig;

/// How the signature in an [`AuthSig`] was produced.
pub const DERIVED_VIA: &str = "web3.eth.personal.sign";

/// Ethereum account that owns the PKP and signs authentication messages.
#[derive(Debug, Clone)]
pub struct AccountWallet {
    signer: PrivateKeySigner,
}

impl AccountWallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> SignerResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| SignerError::Signing(format!("Invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), "Account wallet initialized");

        Ok(Self { signer })
    }

    /// Wallet for the key carried by the process configuration.
    pub fn from_config(config: &AppConfig) -> SignerResult<Self> {
        Self::from_private_key(config.credentials.ethereum_private_key())
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign arbitrary message bytes (with Ethereum prefix).
    pub async fn sign_message(&self, message: &[u8]) -> SignerResult<alloy::signers::Signature> {
        self.signer
            .sign_message(message)
            .await
            .map_err(|e| SignerError::Signing(format!("Message signing failed: {}", e)))
    }

    /// Sign an authentication message and package it for the network.
    pub async fn sign_auth_message(&self, message: &AuthMessage) -> SignerResult<AuthSig> {
        let signed_message = message.to_message();
        let signature = self.sign_message(signed_message.as_bytes()).await?;

        Ok(AuthSig {
            sig: hex::encode_prefixed(signature.as_bytes()),
            derived_via: DERIVED_VIA.to_string(),
            signed_message,
            address: self.address().to_string(),
        })
    }
}
