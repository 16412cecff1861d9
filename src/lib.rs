//! Wrapped-key transaction signer.
//!
//! Signs Solana transactions with keys held by a remote signing network,
//! either through the network's encrypted-signing call or by exporting the
//! key and signing locally.

pub mod account;
pub mod config;
pub mod error;
pub mod jupiter;
pub mod network;
pub mod observability;
pub mod signer;
pub mod solana;
pub mod wrapped_keys;

pub use config::{load_config, AppConfig};
pub use error::{ErrorKind, SignerError, SignerResult};
pub use network::{Chain, HttpSigningNetwork, SigningNetwork};
pub use signer::{SignRequest, SigningMode, WrappedKeySigner};
pub use solana::{SignedTransaction, SolanaCluster, UnsignedTransaction};
pub use wrapped_keys::WrappedKeyGenerator;
