//! Signing network subsystem.
//!
//! # Data Flow
//! ```text
//! SigningNetwork::connect()
//!     → NetworkConnection (handshake done, latest blockhash known)
//!     → session.rs (auth sig → session signatures)
//!     → wrapped-key RPCs (generate, export, sign)
//!     → release() → disconnect(self)
//! ```
//!
//! # Lifecycle
//! A connection is opened per flow and never reused. `disconnect` takes the
//! connection by value, so it can run at most once; [`release`] runs it on
//! every exit path before handing back the flow's outcome.

pub mod http;
pub mod session;
pub mod types;

use async_trait::async_trait;

use crate::error::SignerResult;

pub use http::{HttpConnection, HttpSigningNetwork};
pub use session::SessionCredentialAcquirer;
pub use types::{
    AuthSig, Chain, ExportKeyRequest, ExportedKey, GenerateKeyRequest, Pkp,
    ResourceAbilityRequest, SessionSigs, SessionSigsRequest, SignTransactionRequest, WrappedKey,
};

/// Factory for connections to the remote signing network.
#[async_trait]
pub trait SigningNetwork: Send + Sync {
    type Connection: NetworkConnection;

    /// Open a connection and complete the handshake.
    async fn connect(&self) -> SignerResult<Self::Connection>;
}

/// An open, stateful connection to the signing network.
#[async_trait]
pub trait NetworkConnection: Send + Sync + Sized {
    /// Blockhash reported at handshake; used as the sign-in nonce.
    fn latest_blockhash(&self) -> &str;

    /// Mint a fresh PKP owned by the account behind `auth_sig`.
    async fn mint_pkp(&self, auth_sig: &AuthSig) -> SignerResult<Pkp>;

    /// Exchange an account signature for PKP session signatures.
    async fn issue_session_signatures(
        &self,
        request: &SessionSigsRequest,
    ) -> SignerResult<SessionSigs>;

    /// Generate a new wrapped key under the session's PKP.
    async fn generate_private_key(
        &self,
        session: &SessionSigs,
        request: &GenerateKeyRequest,
    ) -> SignerResult<WrappedKey>;

    /// Decrypt and return a wrapped key's material.
    async fn export_private_key(
        &self,
        session: &SessionSigs,
        request: &ExportKeyRequest,
    ) -> SignerResult<ExportedKey>;

    /// Sign (and optionally broadcast) with a wrapped key without exporting it.
    ///
    /// Returns the base64 signed transaction.
    async fn sign_transaction(
        &self,
        session: &SessionSigs,
        request: &SignTransactionRequest,
    ) -> SignerResult<String>;

    /// Tear the connection down.
    async fn disconnect(self) -> SignerResult<()>;
}

/// Disconnect, then return `outcome` untouched.
///
/// A failed disconnect is logged and does not mask the outcome.
pub async fn release<C: NetworkConnection, T>(connection: C, outcome: SignerResult<T>) -> SignerResult<T> {
    match connection.disconnect().await {
        Ok(()) => tracing::debug!("Disconnected from signing network"),
        Err(e) => tracing::warn!(error = %e, "Failed to disconnect from signing network"),
    }
    outcome
}
