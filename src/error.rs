//! Crate-wide error type.
//!
//! Every failure carries an [`ErrorKind`] so callers can branch on the class
//! of failure instead of matching message text.

use thiserror::Error;

use crate::config::loader::ConfigError;

/// Broad classification of a [`SignerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or malformed configuration. Fatal, no recovery.
    Config,
    /// Connectivity or session failure against the signing network.
    Network,
    /// Bad caller input, raised before any network call.
    InvalidInput,
    /// The quote/swap API answered with an error or an incomplete payload.
    ExternalApi,
    /// Local key handling or signature production failed.
    Signing,
}

impl ErrorKind {
    /// Stable lowercase label, used for log fields and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Config => "config",
            ErrorKind::Network => "network",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::ExternalApi => "external_api",
            ErrorKind::Signing => "signing",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the signer and its collaborators.
#[derive(Debug, Error)]
pub enum SignerError {
    /// Configuration could not be loaded or validated.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Signing network unreachable or returned a failure.
    #[error("Network error ({rpc}): {message}")]
    Network { rpc: &'static str, message: String },

    /// Session credentials could not be obtained or are no longer valid.
    #[error("Session error: {0}")]
    Session(String),

    /// Wrong chain tag, missing payload field, undecodable transaction.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Quote or swap-build endpoint reported an error.
    #[error("External API error from {endpoint}: {message}")]
    ExternalApi { endpoint: &'static str, message: String },

    /// Account key parsing or local signing failed.
    #[error("Signing error: {0}")]
    Signing(String),
}

impl SignerError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SignerError::Config(_) => ErrorKind::Config,
            SignerError::Network { .. } | SignerError::Session(_) => ErrorKind::Network,
            SignerError::InvalidInput(_) => ErrorKind::InvalidInput,
            SignerError::ExternalApi { .. } => ErrorKind::ExternalApi,
            SignerError::Signing(_) => ErrorKind::Signing,
        }
    }

    pub(crate) fn network(rpc: &'static str, message: impl Into<String>) -> Self {
        SignerError::Network {
            rpc,
            message: message.into(),
        }
    }

    pub(crate) fn external(endpoint: &'static str, message: impl Into<String>) -> Self {
        SignerError::ExternalApi {
            endpoint,
            message: message.into(),
        }
    }
}

/// Result type for signer operations.
pub type SignerResult<T> = Result<T, SignerError>;
