//! Configuration schema definitions.
//!
//! This module defines the settings file structure for the signer.
//! All types derive Serde traits for deserialization from TOML. Secrets are
//! deliberately absent: they only ever come from the environment.

use serde::{Deserialize, Serialize};

use crate::signer::SigningMode;
use crate::solana::SolanaCluster;

/// Root settings for the wrapped-key signer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SignerConfig {
    /// Signing network gateway settings.
    pub network: NetworkConfig,

    /// Session credential settings.
    pub session: SessionConfig,

    /// Solana RPC endpoints used for broadcast.
    pub solana: SolanaConfig,

    /// DEX aggregator endpoints and swap defaults.
    pub jupiter: JupiterConfig,

    /// Default signing strategy.
    pub signing: SigningConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Signing network gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Base URL of the signing network gateway.
    pub gateway_url: String,

    /// Network name (e.g., "datil-dev", "datil-test", "datil").
    pub network_name: String,

    /// Domain placed in the authentication message.
    pub domain: String,

    /// Origin URI placed in the authentication message.
    pub origin: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            gateway_url: "http://localhost:7470".to_string(),
            network_name: "datil-dev".to_string(),
            domain: "localhost".to_string(),
            origin: "http://localhost:3000".to_string(),
        }
    }
}

/// Session credential configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Lifetime of issued session signatures in minutes.
    pub expiry_minutes: i64,

    /// Resource the capability is scoped to ("*" grants every action).
    pub resource: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_minutes: 10,
            resource: "*".to_string(),
        }
    }
}

/// Solana RPC configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SolanaConfig {
    pub mainnet_rpc_url: String,
    pub devnet_rpc_url: String,
    pub testnet_rpc_url: String,

    /// Commitment used for preflight simulation on broadcast.
    pub preflight_commitment: String,
}

impl SolanaConfig {
    /// RPC endpoint for a cluster.
    pub fn rpc_url(&self, cluster: SolanaCluster) -> &str {
        match cluster {
            SolanaCluster::MainnetBeta => &self.mainnet_rpc_url,
            SolanaCluster::Devnet => &self.devnet_rpc_url,
            SolanaCluster::Testnet => &self.testnet_rpc_url,
        }
    }
}

impl Default for SolanaConfig {
    fn default() -> Self {
        Self {
            mainnet_rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            devnet_rpc_url: "https://api.devnet.solana.com".to_string(),
            testnet_rpc_url: "https://api.testnet.solana.com".to_string(),
            preflight_commitment: "confirmed".to_string(),
        }
    }
}

/// DEX aggregator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JupiterConfig {
    /// Base URL of the quote/swap API.
    pub base_url: String,

    /// Default slippage in basis points.
    pub slippage_bps: u16,

    /// Wrap and unwrap native SOL automatically.
    pub wrap_and_unwrap_sol: bool,

    /// Priority fee in micro-lamports per compute unit. `None` lets the API decide.
    pub compute_unit_price_micro_lamports: Option<u64>,
}

impl Default for JupiterConfig {
    fn default() -> Self {
        Self {
            base_url: "https://quote-api.jup.ag".to_string(),
            slippage_bps: 50,
            wrap_and_unwrap_sol: true,
            compute_unit_price_micro_lamports: None,
        }
    }
}

/// Signing strategy configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SigningConfig {
    pub mode: SigningMode,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
