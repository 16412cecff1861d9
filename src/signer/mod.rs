//! Transaction signing subsystem.
//!
//! # Data Flow
//! ```text
//! SignRequest
//!     → validation.rs (chain + payload checks, no network yet)
//!     → connect → session signatures
//!     → decode transaction
//!     → SigningStrategy (native.rs | local_export.rs)
//!     → release connection
//!     → SignedTransaction (base64)
//! ```
//!
//! Both strategies take the same inputs and return the same format; the
//! [`SigningMode`] flag picks one.

pub mod local_export;
pub mod native;
pub mod types;
pub mod validation;

use async_trait::async_trait;

use crate::account::AccountWallet;
use crate::config::{AppConfig, SignerConfig};
use crate::error::{SignerError, SignerResult};
use crate::network::{self, NetworkConnection, SessionCredentialAcquirer, SessionSigs, SigningNetwork};
use crate::observability::metrics;
use crate::solana::transaction::decode_transaction;
use crate::solana::SignedTransaction;

pub use local_export::LocalExportStrategy;
pub use native::NativeStrategy;
pub use types::{FlowState, PreparedTransaction, SignRequest, SigningMode};

/// One way of turning a prepared transaction into a signed one.
#[async_trait]
pub trait SigningStrategy: Send + Sync {
    fn mode(&self) -> SigningMode;

    /// Sign, and broadcast when asked, over an authenticated connection.
    async fn sign<C: NetworkConnection>(
        &self,
        connection: &C,
        session: &SessionSigs,
        prepared: &PreparedTransaction,
        broadcast: bool,
    ) -> SignerResult<SignedTransaction>;
}

/// Tracks and logs state transitions of one flow.
#[derive(Debug)]
struct FlowTracker {
    state: FlowState,
}

impl FlowTracker {
    fn new() -> Self {
        Self { state: FlowState::Init }
    }

    fn advance(&mut self, next: FlowState) {
        tracing::debug!(from = %self.state, to = %next, "Signing flow transition");
        self.state = next;
    }

    fn fail(&self, error: &SignerError) {
        tracing::error!(
            error = %error,
            kind = %error.kind(),
            stage = %self.state,
            "Signing flow failed"
        );
    }
}

/// Signing entry point.
///
/// Each call opens its own connection, acquires fresh session signatures and
/// releases the connection before returning, whatever the outcome.
pub struct WrappedKeySigner<N> {
    settings: SignerConfig,
    wallet: AccountWallet,
    network: N,
    mode: SigningMode,
    http: reqwest::Client,
}

impl<N: SigningNetwork> WrappedKeySigner<N> {
    /// Signer using the configured default mode.
    pub fn new(config: &AppConfig, network: N) -> SignerResult<Self> {
        Ok(Self {
            settings: config.settings.clone(),
            wallet: AccountWallet::from_config(config)?,
            network,
            mode: config.settings.signing.mode,
            http: reqwest::Client::new(),
        })
    }

    /// Override the signing mode.
    pub fn with_mode(mut self, mode: SigningMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> SigningMode {
        self.mode
    }

    /// Sign `request` with the selected strategy.
    pub async fn sign(&self, request: &SignRequest) -> SignerResult<SignedTransaction> {
        let result = match self.mode {
            SigningMode::Native => self.run(&NativeStrategy, request).await,
            SigningMode::LocalExport => {
                let strategy = LocalExportStrategy::new(self.http.clone(), self.settings.solana.clone());
                self.run(&strategy, request).await
            }
        };

        metrics::record_sign(self.mode.as_str(), &result);
        result
    }

    async fn run<S: SigningStrategy>(
        &self,
        strategy: &S,
        request: &SignRequest,
    ) -> SignerResult<SignedTransaction> {
        let mut flow = FlowTracker::new();

        let payload = validation::validate_request(request).inspect_err(|e| flow.fail(e))?;

        let connection = self.network.connect().await.inspect_err(|e| flow.fail(e))?;
        flow.advance(FlowState::Connected);

        let outcome = async {
            let acquirer = SessionCredentialAcquirer::new(&self.settings, &self.wallet);
            let session = acquirer.acquire(&connection, &request.pkp_public_key).await?;
            flow.advance(FlowState::Authenticated);

            let prepared = PreparedTransaction {
                key_id: request.key_id.clone(),
                cluster: payload.cluster,
                transaction: decode_transaction(payload.serialized_transaction)?,
            };
            flow.advance(FlowState::TransactionValidated);

            let signed = strategy
                .sign(&connection, &session, &prepared, request.broadcast)
                .await?;
            flow.advance(FlowState::Signed);
            if request.broadcast {
                flow.advance(FlowState::Broadcast);
            }

            Ok::<_, SignerError>(signed)
        }
        .await;

        if let Err(e) = &outcome {
            flow.fail(e);
        }

        let outcome = network::release(connection, outcome).await;
        flow.advance(FlowState::Disconnected);

        if outcome.is_ok() {
            tracing::info!(
                mode = %strategy.mode(),
                key_id = %request.key_id,
                broadcast = request.broadcast,
                "Transaction signed"
            );
        }

        outcome
    }
}
