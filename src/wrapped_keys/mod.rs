//! Identity and wrapped-key provisioning.
//!
//! # Responsibilities
//! - Mint a PKP owned by the configured account
//! - Generate a wrapped key under that PKP
//!
//! Each operation runs on its own connection, released before returning.

use crate::account::AccountWallet;
use crate::config::AppConfig;
use crate::error::SignerResult;
use crate::network::{
    self, Chain, GenerateKeyRequest, NetworkConnection, Pkp, SessionCredentialAcquirer,
    SigningNetwork, WrappedKey,
};

/// Provisions PKPs and wrapped keys for the configured account.
pub struct WrappedKeyGenerator<'a, N> {
    config: &'a AppConfig,
    wallet: AccountWallet,
    network: &'a N,
}

impl<'a, N: SigningNetwork> WrappedKeyGenerator<'a, N> {
    pub fn new(config: &'a AppConfig, network: &'a N) -> SignerResult<Self> {
        Ok(Self {
            config,
            wallet: AccountWallet::from_config(config)?,
            network,
        })
    }

    /// Mint a fresh PKP identity.
    pub async fn mint_pkp(&self) -> SignerResult<Pkp> {
        let connection = self.network.connect().await?;

        let outcome = async {
            let acquirer = SessionCredentialAcquirer::new(&self.config.settings, &self.wallet);
            let auth_sig = acquirer.authenticate(&connection).await?;
            connection.mint_pkp(&auth_sig).await
        }
        .await;

        let pkp = network::release(connection, outcome)
            .await
            .inspect_err(|e| tracing::error!(error = %e, kind = %e.kind(), "PKP mint failed"))?;

        tracing::info!(token_id = %pkp.token_id, eth_address = %pkp.eth_address, "PKP minted");
        Ok(pkp)
    }

    /// Generate a wrapped key for `chain` owned by the PKP.
    pub async fn generate(
        &self,
        pkp_public_key: &str,
        chain: Chain,
        memo: &str,
    ) -> SignerResult<WrappedKey> {
        let connection = self.network.connect().await?;

        let outcome = async {
            let acquirer = SessionCredentialAcquirer::new(&self.config.settings, &self.wallet);
            let session = acquirer.acquire(&connection, pkp_public_key).await?;
            let request = GenerateKeyRequest {
                network: chain,
                memo: memo.to_string(),
            };
            connection.generate_private_key(&session, &request).await
        }
        .await;

        let key = network::release(connection, outcome).await.inspect_err(|e| {
            tracing::error!(error = %e, kind = %e.kind(), "Wrapped key generation failed")
        })?;

        tracing::info!(
            id = %key.id,
            network = %key.network,
            public_key = %key.generated_public_key,
            "Wrapped key generated"
        );
        Ok(key)
    }
}
