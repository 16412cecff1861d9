//! DEX aggregator integration.
//!
//! Supplies realistic unsigned swap transactions for the signer.

pub mod client;
pub mod types;

pub use client::JupiterClient;
pub use types::{ComputeUnitPrice, Quote, QuoteRequest, LAMPORTS_PER_SOL, SOL_MINT, USDC_MINT};
