//! Native strategy: the network signs with the encrypted key.

use async_trait::async_trait;

use crate::error::SignerResult;
use crate::network::{Chain, NetworkConnection, SessionSigs, SignTransactionRequest};
use crate::signer::types::{PreparedTransaction, SigningMode};
use crate::signer::SigningStrategy;
use crate::solana::transaction::message_payload;
use crate::solana::{SignedTransaction, UnsignedTransaction};

/// Hands the message bytes to the network's encrypted-signing call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeStrategy;

#[async_trait]
impl SigningStrategy for NativeStrategy {
    fn mode(&self) -> SigningMode {
        SigningMode::Native
    }

    async fn sign<C: NetworkConnection>(
        &self,
        connection: &C,
        session: &SessionSigs,
        prepared: &PreparedTransaction,
        broadcast: bool,
    ) -> SignerResult<SignedTransaction> {
        // Signature slots are stripped; the network fills its own.
        let payload = message_payload(&prepared.transaction);

        let request = SignTransactionRequest {
            id: prepared.key_id.clone(),
            network: Chain::Solana,
            unsigned_transaction: UnsignedTransaction::new(payload, prepared.cluster),
            broadcast,
        };

        let signed = connection.sign_transaction(session, &request).await?;
        Ok(SignedTransaction::new(signed))
    }
}
