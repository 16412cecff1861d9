//! Solana transaction handling.
//!
//! # Data Flow
//! ```text
//! base64 wire transaction
//!     → transaction.rs (decode, message payload, local sign, encode)
//!     → rpc.rs (optional broadcast via sendTransaction)
//! ```

pub mod rpc;
pub mod transaction;
pub mod types;

pub use rpc::SolanaRpc;
pub use types::{SignedTransaction, SolanaCluster, UnsignedTransaction};
