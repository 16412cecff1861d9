//! Transaction decoding, re-serialization and local signing.
//!
//! # Responsibilities
//! - Decode base64 wire-format transactions (legacy and v0 messages)
//! - Produce the message-only payload handed to the signing network
//! - Sign locally with an exported key and re-encode

use alloy::hex;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use solana_sdk::message::VersionedMessage;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::VersionedTransaction;

use crate::error::{SignerError, SignerResult};

/// Decode a base64 wire-format transaction.
pub fn decode_transaction(serialized: &str) -> SignerResult<VersionedTransaction> {
    let bytes = BASE64
        .decode(serialized.trim())
        .map_err(|e| SignerError::InvalidInput(format!("Transaction is not valid base64: {}", e)))?;

    bincode::deserialize::<VersionedTransaction>(&bytes).map_err(|e| {
        SignerError::InvalidInput(format!("Failed to deserialize transaction: {}", e))
    })
}

/// Encode a transaction into base64 wire format.
pub fn encode_transaction(transaction: &VersionedTransaction) -> SignerResult<String> {
    let bytes = bincode::serialize(transaction)
        .map_err(|e| SignerError::Signing(format!("Failed to serialize transaction: {}", e)))?;
    Ok(BASE64.encode(bytes))
}

/// Base64 of the message portion only, without any signature slots.
pub fn message_payload(transaction: &VersionedTransaction) -> String {
    BASE64.encode(transaction.message.serialize())
}

/// Decode a message-only payload produced by [`message_payload`].
pub fn decode_message(payload: &str) -> SignerResult<VersionedMessage> {
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| SignerError::InvalidInput(format!("Message is not valid base64: {}", e)))?;

    bincode::deserialize::<VersionedMessage>(&bytes)
        .map_err(|e| SignerError::InvalidInput(format!("Failed to deserialize message: {}", e)))
}

/// Position of `signer` among the message's required signers.
pub fn signer_index(message: &VersionedMessage, signer: &Pubkey) -> Option<usize> {
    let required = message.header().num_required_signatures as usize;
    message
        .static_account_keys()
        .iter()
        .take(required)
        .position(|key| key == signer)
}

/// Sign `transaction` in place with `keypair`.
///
/// Only the keypair's own signature slot is written; other slots keep
/// whatever they held.
pub fn sign_with_keypair(
    transaction: &mut VersionedTransaction,
    keypair: &Keypair,
) -> SignerResult<Signature> {
    let pubkey = keypair.pubkey();
    let index = signer_index(&transaction.message, &pubkey).ok_or_else(|| {
        SignerError::Signing(format!("{} is not a required signer of this transaction", pubkey))
    })?;

    let required = transaction.message.header().num_required_signatures as usize;
    if transaction.signatures.len() < required {
        transaction.signatures.resize(required, Signature::default());
    }

    let signature = keypair.sign_message(&transaction.message.serialize());
    transaction.signatures[index] = signature;
    Ok(signature)
}

/// Build a keypair from an exported hex secret (64 bytes, optional `0x`).
pub fn keypair_from_hex(secret_hex: &str) -> SignerResult<Keypair> {
    let bytes = hex::decode(secret_hex.trim().trim_start_matches("0x"))
        .map_err(|e| SignerError::Signing(format!("Exported key is not valid hex: {}", e)))?;

    if bytes.len() != 64 {
        return Err(SignerError::Signing(format!(
            "Exported key has {} bytes, expected 64",
            bytes.len()
        )));
    }

    #[allow(deprecated)]
    Keypair::from_bytes(&bytes)
        .map_err(|e| SignerError::Signing(format!("Invalid exported key: {}", e)))
}
