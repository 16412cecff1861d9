//! Session credential acquisition.
//!
//! # Responsibilities
//! - Sign a sign-in message with the account wallet
//! - Request session signatures scoped to one capability
//! - Reject grants that are already expired or do not cover the capability
//!
//! No retries: every failure goes straight back to the caller.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::account::{AccountWallet, AuthMessage};
use crate::config::SignerConfig;
use crate::error::{SignerError, SignerResult};
use crate::network::types::{AuthSig, ResourceAbilityRequest, SessionSigs, SessionSigsRequest};
use crate::network::NetworkConnection;

/// Chain ID written into sign-in messages.
const AUTH_CHAIN_ID: u64 = 1;

/// Obtains session signatures for a PKP on behalf of the account wallet.
pub struct SessionCredentialAcquirer<'a> {
    config: &'a SignerConfig,
    wallet: &'a AccountWallet,
}

impl<'a> SessionCredentialAcquirer<'a> {
    pub fn new(config: &'a SignerConfig, wallet: &'a AccountWallet) -> Self {
        Self { config, wallet }
    }

    /// The single capability every session is scoped to.
    pub fn capability(&self) -> ResourceAbilityRequest {
        ResourceAbilityRequest::action_execution(self.config.session.resource.clone())
    }

    /// Sign a plain sign-in message with no capabilities attached.
    pub async fn authenticate<C: NetworkConnection>(&self, connection: &C) -> SignerResult<AuthSig> {
        let issued_at = Utc::now();
        let message = AuthMessage {
            domain: self.config.network.domain.clone(),
            address: self.wallet.address(),
            statement: "Sign in to the signing network.".to_string(),
            uri: self.config.network.origin.clone(),
            chain_id: AUTH_CHAIN_ID,
            nonce: connection.latest_blockhash().to_string(),
            issued_at,
            expiration: issued_at + Duration::minutes(self.config.session.expiry_minutes),
            resources: Vec::new(),
        };

        self.wallet.sign_auth_message(&message).await
    }

    /// Acquire session signatures for `pkp_public_key`.
    pub async fn acquire<C: NetworkConnection>(
        &self,
        connection: &C,
        pkp_public_key: &str,
    ) -> SignerResult<SessionSigs> {
        let capability = self.capability();
        let issued_at = Utc::now();
        let expiration = issued_at + Duration::minutes(self.config.session.expiry_minutes);

        let message = AuthMessage {
            domain: self.config.network.domain.clone(),
            address: self.wallet.address(),
            statement: format!(
                "I further authorize the stated URI to perform the following actions on my behalf: '{}' for '{}'.",
                capability.ability,
                capability.resource_uri()
            ),
            uri: format!("lit:session:{}", Uuid::new_v4().simple()),
            chain_id: AUTH_CHAIN_ID,
            nonce: connection.latest_blockhash().to_string(),
            issued_at,
            expiration,
            resources: vec![capability.resource_uri()],
        };

        let auth_sig = self.wallet.sign_auth_message(&message).await?;

        let request = SessionSigsRequest {
            pkp_public_key: pkp_public_key.to_string(),
            auth_sig,
            resource_ability_requests: vec![capability.clone()],
            expiration,
        };

        let session = connection.issue_session_signatures(&request).await?;

        if session.signatures.is_empty() {
            return Err(SignerError::Session("Network returned no session signatures".to_string()));
        }
        if session.is_expired_at(Utc::now()) {
            return Err(SignerError::Session(format!(
                "Session signatures expired at {}",
                session.expiration
            )));
        }
        if !session.grants(&capability) {
            return Err(SignerError::Session(format!(
                "Session does not grant '{}' on '{}'",
                capability.ability,
                capability.resource_uri()
            )));
        }

        tracing::info!(
            address = %self.wallet.address(),
            nodes = session.signatures.len(),
            expiration = %session.expiration,
            "Session signatures acquired"
        );

        Ok(session)
    }
}
