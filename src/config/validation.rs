//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate endpoint URLs and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SignerConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::SignerConfig;
use crate::solana::SolanaCluster;

/// Longest session lifetime accepted, in minutes.
const MAX_SESSION_MINUTES: i64 = 24 * 60;

/// A single semantic problem in the settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &SignerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "network.gateway_url", &config.network.gateway_url);
    check_url(&mut errors, "jupiter.base_url", &config.jupiter.base_url);
    for cluster in SolanaCluster::ALL {
        let field = format!("solana.{}_rpc_url", cluster.config_key());
        check_url(&mut errors, &field, config.solana.rpc_url(cluster));
    }

    if config.network.network_name.trim().is_empty() {
        errors.push(ValidationError::new("network.network_name", "must not be empty"));
    }

    let expiry = config.session.expiry_minutes;
    if expiry <= 0 || expiry > MAX_SESSION_MINUTES {
        errors.push(ValidationError::new(
            "session.expiry_minutes",
            format!("must be between 1 and {}, got {}", MAX_SESSION_MINUTES, expiry),
        ));
    }

    if config.session.resource.trim().is_empty() {
        errors.push(ValidationError::new("session.resource", "must not be empty"));
    }

    if config.jupiter.slippage_bps > 10_000 {
        errors.push(ValidationError::new(
            "jupiter.slippage_bps",
            format!("must be at most 10000, got {}", config.jupiter.slippage_bps),
        ));
    }

    if !matches!(
        config.solana.preflight_commitment.as_str(),
        "processed" | "confirmed" | "finalized"
    ) {
        errors.push(ValidationError::new(
            "solana.preflight_commitment",
            "must be one of processed, confirmed, finalized",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL: {}", e))),
    }
}
