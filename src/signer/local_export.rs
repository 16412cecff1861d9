//! Local-export strategy: decrypt the key through the network, sign here.
//!
//! # Security
//! - The exported key lives only for the duration of one signature
//! - Neither the exported secret nor the keypair is ever logged

use async_trait::async_trait;
use solana_sdk::signer::Signer;

use crate::config::SolanaConfig;
use crate::error::{SignerError, SignerResult};
use crate::network::{Chain, ExportKeyRequest, NetworkConnection, SessionSigs};
use crate::signer::types::{PreparedTransaction, SigningMode};
use crate::signer::SigningStrategy;
use crate::solana::transaction::{encode_transaction, keypair_from_hex, sign_with_keypair};
use crate::solana::{SignedTransaction, SolanaRpc};

/// Exports the wrapped key and signs with a local keypair.
#[derive(Debug, Clone)]
pub struct LocalExportStrategy {
    http: reqwest::Client,
    solana: SolanaConfig,
}

impl LocalExportStrategy {
    pub fn new(http: reqwest::Client, solana: SolanaConfig) -> Self {
        Self { http, solana }
    }
}

#[async_trait]
impl SigningStrategy for LocalExportStrategy {
    fn mode(&self) -> SigningMode {
        SigningMode::LocalExport
    }

    async fn sign<C: NetworkConnection>(
        &self,
        connection: &C,
        session: &SessionSigs,
        prepared: &PreparedTransaction,
        broadcast: bool,
    ) -> SignerResult<SignedTransaction> {
        let request = ExportKeyRequest {
            id: prepared.key_id.clone(),
            network: Chain::Solana,
        };
        let exported = connection.export_private_key(session, &request).await?;

        let signed = {
            let keypair = keypair_from_hex(&exported.decrypted_private_key)?;
            let pubkey = keypair.pubkey().to_string();
            if pubkey != exported.public_key {
                return Err(SignerError::Signing(format!(
                    "Exported key {} does not match its public key {}",
                    pubkey, exported.public_key
                )));
            }

            let mut transaction = prepared.transaction.clone();
            sign_with_keypair(&mut transaction, &keypair)?;
            SignedTransaction::new(encode_transaction(&transaction)?)
        };
        drop(exported);

        if broadcast {
            let rpc = SolanaRpc::for_cluster(self.http.clone(), &self.solana, prepared.cluster);
            rpc.send_transaction(&signed).await?;
        }

        Ok(signed)
    }
}
