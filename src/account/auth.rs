//! Sign-in message presented to the signing network (EIP-4361 layout).

use alloy::primitives::Address;
use chrono::{DateTime, SecondsFormat, Utc};

/// Fields of a sign-in-with-Ethereum message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthMessage {
    pub domain: String,
    pub address: Address,
    pub statement: String,
    pub uri: String,
    pub chain_id: u64,
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
    pub expiration: DateTime<Utc>,
    pub resources: Vec<String>,
}

impl AuthMessage {
    /// Render the exact text that gets signed.
    pub fn to_message(&self) -> String {
        let mut message = format!(
            "{domain} wants you to sign in with your Ethereum account:\n\
             {address}\n\
             \n\
             {statement}\n\
             \n\
             URI: {uri}\n\
             Version: 1\n\
             Chain ID: {chain_id}\n\
             Nonce: {nonce}\n\
             Issued At: {issued_at}\n\
             Expiration Time: {expiration}",
            domain = self.domain,
            address = self.address.to_checksum(None),
            statement = self.statement,
            uri = self.uri,
            chain_id = self.chain_id,
            nonce = self.nonce,
            issued_at = timestamp(&self.issued_at),
            expiration = timestamp(&self.expiration),
        );

        if !self.resources.is_empty() {
            message.push_str("\nResources:");
            for resource in &self.resources {
                message.push_str("\n- ");
                message.push_str(resource);
            }
        }

        message
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
