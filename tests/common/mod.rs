//! Shared utilities for integration tests.
//!
//! Provides an in-memory signing network, axum-based mock servers bound to
//! ephemeral ports, and transaction fixtures.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::hex;
use async_trait::async_trait;
use axum::Router;
use chrono::{Duration, Utc};
use solana_sdk::hash::Hash;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::message::{v0, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::VersionedTransaction;
use tokio::net::TcpListener;

use wrapped_key_signer::config::{AppConfig, SignerConfig};
use wrapped_key_signer::network::types::SessionSig;
use wrapped_key_signer::network::{
    AuthSig, ExportKeyRequest, ExportedKey, GenerateKeyRequest, Pkp, SessionSigs,
    SessionSigsRequest, SignTransactionRequest, WrappedKey,
};
use wrapped_key_signer::network::{NetworkConnection, SigningNetwork};
use wrapped_key_signer::solana::transaction::{decode_message, encode_transaction, sign_with_keypair};
use wrapped_key_signer::{SignerError, SignerResult};

/// Anvil's first development key.
pub const ACCOUNT_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Uncompressed secp256k1 public key used as the PKP in tests.
pub const PKP_PUBLIC_KEY: &str = "0x04a3f1c2b4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f708192a3b4c5d6e7f80";

pub const KEY_ID: &str = "wrapped-key-1";

/// Validated config with the test account key and default settings.
pub fn test_config() -> AppConfig {
    config_with(SignerConfig::default())
}

pub fn config_with(settings: SignerConfig) -> AppConfig {
    AppConfig::from_parts(settings, Some(ACCOUNT_KEY.to_string())).unwrap()
}

/// Base64 unsigned v0 transaction with `payer` as its only signer.
pub fn unsigned_transaction(payer: &Pubkey) -> String {
    let instruction = Instruction::new_with_bytes(
        Pubkey::new_unique(),
        &[2, 0, 0, 0, 64, 66, 15, 0, 0, 0, 0, 0],
        vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(Pubkey::new_unique(), false),
        ],
    );
    let message = v0::Message::try_compile(payer, &[instruction], &[], Hash::new_unique()).unwrap();
    let transaction = VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::V0(message),
    };
    encode_transaction(&transaction).unwrap()
}

/// Sign a message-only payload the way the network's encrypted-signing call does.
pub fn sign_message_payload(keypair: &Keypair, payload: &str) -> SignerResult<String> {
    let message = decode_message(payload)?;
    let required = message.header().num_required_signatures as usize;
    let mut transaction = VersionedTransaction {
        signatures: vec![Signature::default(); required],
        message,
    };
    sign_with_keypair(&mut transaction, keypair)?;
    encode_transaction(&transaction)
}

/// Session signatures granting exactly what was requested.
pub fn grant(request: &SessionSigsRequest) -> SessionSigs {
    let mut signatures = BTreeMap::new();
    signatures.insert(
        "https://node-1.test".to_string(),
        SessionSig {
            sig: "0xsessionsig".to_string(),
            derived_via: "litSessionSignViaNacl".to_string(),
            signed_message: request.auth_sig.signed_message.clone(),
            address: request.auth_sig.address.clone(),
            algo: Some("ed25519".to_string()),
        },
    );

    SessionSigs {
        signatures,
        expiration: request.expiration,
        capabilities: request.resource_ability_requests.clone(),
    }
}

/// Failure switches for [`MockNetwork`].
#[derive(Debug, Default)]
pub struct Faults {
    pub connect: AtomicBool,
    pub sign: AtomicBool,
    pub export: AtomicBool,
    pub disconnect: AtomicBool,
    pub expired_session: AtomicBool,
    pub wrong_export_key: AtomicBool,
}

#[derive(Debug)]
pub struct MockState {
    pub keypair: Keypair,
    pub blockhash: String,
    pub connects: AtomicUsize,
    pub disconnects: AtomicUsize,
    pub sign_calls: AtomicUsize,
    pub export_calls: AtomicUsize,
    pub faults: Faults,
    pub session_requests: Mutex<Vec<SessionSigsRequest>>,
    pub sign_requests: Mutex<Vec<SignTransactionRequest>>,
}

/// In-memory signing network holding a single wrapped Solana key.
#[derive(Debug, Clone)]
pub struct MockNetwork {
    pub state: Arc<MockState>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self {
            state: Arc::new(MockState {
                keypair: Keypair::new(),
                blockhash: Hash::new_unique().to_string(),
                connects: AtomicUsize::new(0),
                disconnects: AtomicUsize::new(0),
                sign_calls: AtomicUsize::new(0),
                export_calls: AtomicUsize::new(0),
                faults: Faults::default(),
                session_requests: Mutex::new(Vec::new()),
                sign_requests: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn wrapped_pubkey(&self) -> Pubkey {
        self.state.keypair.pubkey()
    }

    pub fn connects(&self) -> usize {
        self.state.connects.load(Ordering::SeqCst)
    }

    pub fn disconnects(&self) -> usize {
        self.state.disconnects.load(Ordering::SeqCst)
    }

    pub fn faults(&self) -> &Faults {
        &self.state.faults
    }
}

impl Default for MockNetwork {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SigningNetwork for MockNetwork {
    type Connection = MockConnection;

    async fn connect(&self) -> SignerResult<MockConnection> {
        if self.state.faults.connect.load(Ordering::SeqCst) {
            return Err(SignerError::Network {
                rpc: "connect",
                message: "handshake refused".to_string(),
            });
        }
        self.state.connects.fetch_add(1, Ordering::SeqCst);
        Ok(MockConnection {
            state: self.state.clone(),
        })
    }
}

#[derive(Debug)]
pub struct MockConnection {
    state: Arc<MockState>,
}

impl MockConnection {
    fn fail(rpc: &'static str) -> SignerError {
        SignerError::Network {
            rpc,
            message: "injected failure".to_string(),
        }
    }
}

#[async_trait]
impl NetworkConnection for MockConnection {
    fn latest_blockhash(&self) -> &str {
        &self.state.blockhash
    }

    async fn mint_pkp(&self, auth_sig: &AuthSig) -> SignerResult<Pkp> {
        Ok(Pkp {
            token_id: "0x01".to_string(),
            public_key: PKP_PUBLIC_KEY.to_string(),
            eth_address: auth_sig.address.clone(),
        })
    }

    async fn issue_session_signatures(
        &self,
        request: &SessionSigsRequest,
    ) -> SignerResult<SessionSigs> {
        self.state.session_requests.lock().unwrap().push(request.clone());

        let mut session = grant(request);
        if self.state.faults.expired_session.load(Ordering::SeqCst) {
            session.expiration = Utc::now() - Duration::minutes(1);
        }
        Ok(session)
    }

    async fn generate_private_key(
        &self,
        _session: &SessionSigs,
        request: &GenerateKeyRequest,
    ) -> SignerResult<WrappedKey> {
        Ok(WrappedKey {
            id: KEY_ID.to_string(),
            generated_public_key: self.state.keypair.pubkey().to_string(),
            pkp_address: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
            network: request.network,
            memo: request.memo.clone(),
        })
    }

    async fn export_private_key(
        &self,
        _session: &SessionSigs,
        request: &ExportKeyRequest,
    ) -> SignerResult<ExportedKey> {
        self.state.export_calls.fetch_add(1, Ordering::SeqCst);
        if self.state.faults.export.load(Ordering::SeqCst) {
            return Err(Self::fail("export-key"));
        }

        let public_key = if self.state.faults.wrong_export_key.load(Ordering::SeqCst) {
            Pubkey::new_unique().to_string()
        } else {
            self.state.keypair.pubkey().to_string()
        };

        Ok(ExportedKey {
            id: request.id.clone(),
            decrypted_private_key: hex::encode(self.state.keypair.to_bytes()),
            public_key,
            key_type: "ed25519".to_string(),
        })
    }

    async fn sign_transaction(
        &self,
        _session: &SessionSigs,
        request: &SignTransactionRequest,
    ) -> SignerResult<String> {
        self.state.sign_calls.fetch_add(1, Ordering::SeqCst);
        self.state.sign_requests.lock().unwrap().push(request.clone());
        if self.state.faults.sign.load(Ordering::SeqCst) {
            return Err(Self::fail("sign-transaction"));
        }

        let payload = request
            .unsigned_transaction
            .serialized_transaction
            .as_deref()
            .unwrap_or_default();
        sign_message_payload(&self.state.keypair, payload)
    }

    async fn disconnect(self) -> SignerResult<()> {
        self.state.disconnects.fetch_add(1, Ordering::SeqCst);
        if self.state.faults.disconnect.load(Ordering::SeqCst) {
            return Err(Self::fail("disconnect"));
        }
        Ok(())
    }
}

/// Serve `router` on an ephemeral local port; returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// True when `value` looks like standard-alphabet padded base64.
pub fn is_base64(value: &str) -> bool {
    let body = value.trim_end_matches('=');
    let padding = value.len() - body.len();
    !body.is_empty()
        && padding <= 2
        && value.len() % 4 == 0
        && body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/')
}
