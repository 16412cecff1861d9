//! Pre-flight checks run before any network call.

use alloy::hex;

use crate::error::{SignerError, SignerResult};
use crate::network::Chain;
use crate::signer::types::{SignRequest, ValidatedPayload};
use crate::solana::SolanaCluster;

/// Check a request and pull out the Solana payload.
pub fn validate_request(request: &SignRequest) -> SignerResult<ValidatedPayload<'_>> {
    if request.chain != Chain::Solana {
        return Err(SignerError::InvalidInput(format!(
            "Unsupported chain '{}': only solana transactions can be signed",
            request.chain
        )));
    }

    let serialized_transaction = request
        .transaction
        .serialized_transaction
        .as_deref()
        .filter(|tx| !tx.trim().is_empty())
        .ok_or_else(|| {
            SignerError::InvalidInput("Transaction payload is missing serializedTransaction".to_string())
        })?;

    let cluster: SolanaCluster = request
        .transaction
        .chain
        .as_deref()
        .ok_or_else(|| SignerError::InvalidInput("Transaction payload is missing chain".to_string()))?
        .parse()?;

    if request.key_id.trim().is_empty() {
        return Err(SignerError::InvalidInput("Wrapped key id must not be empty".to_string()));
    }

    let pkp_hex = request.pkp_public_key.trim_start_matches("0x");
    if pkp_hex.is_empty() || hex::decode(pkp_hex).is_err() {
        return Err(SignerError::InvalidInput(format!(
            "PKP public key is not valid hex: '{}'",
            request.pkp_public_key
        )));
    }

    Ok(ValidatedPayload {
        serialized_transaction,
        cluster,
    })
}
