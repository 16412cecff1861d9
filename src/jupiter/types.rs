//! Quote and swap payloads for the DEX aggregator.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Wrapped SOL mint.
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// USDC mint on mainnet-beta.
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Parameters of a quote lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub input_mint: String,
    pub output_mint: String,
    /// Input amount in the input mint's base units.
    pub amount: u64,
    pub slippage_bps: u16,
}

impl QuoteRequest {
    /// Quote for swapping `lamports` of SOL into USDC.
    pub fn sol_to_usdc(lamports: u64, slippage_bps: u16) -> Self {
        Self {
            input_mint: SOL_MINT.to_string(),
            output_mint: USDC_MINT.to_string(),
            amount: lamports,
            slippage_bps,
        }
    }

    pub(crate) fn query(&self) -> [(&'static str, String); 4] {
        [
            ("inputMint", self.input_mint.clone()),
            ("outputMint", self.output_mint.clone()),
            ("amount", self.amount.to_string()),
            ("slippageBps", self.slippage_bps.to_string()),
        ]
    }
}

/// A quote as returned by the API.
///
/// Kept verbatim: the swap-build call expects it echoed back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    raw: Value,
}

impl Quote {
    pub(crate) fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn in_amount(&self) -> Option<&str> {
        self.raw.get("inAmount").and_then(Value::as_str)
    }

    pub fn out_amount(&self) -> Option<&str> {
        self.raw.get("outAmount").and_then(Value::as_str)
    }

    pub fn price_impact_pct(&self) -> Option<&str> {
        self.raw.get("priceImpactPct").and_then(Value::as_str)
    }
}

/// Priority fee setting for the swap transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeUnitPrice {
    /// Let the API pick.
    Auto,
    MicroLamports(u64),
}

impl From<Option<u64>> for ComputeUnitPrice {
    fn from(value: Option<u64>) -> Self {
        value.map_or(ComputeUnitPrice::Auto, ComputeUnitPrice::MicroLamports)
    }
}

impl Serialize for ComputeUnitPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ComputeUnitPrice::Auto => serializer.serialize_str("auto"),
            ComputeUnitPrice::MicroLamports(price) => serializer.serialize_u64(*price),
        }
    }
}

/// Body of the swap-build call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SwapRequest<'a> {
    pub quote_response: &'a Value,
    pub user_public_key: &'a str,
    pub wrap_and_unwrap_sol: bool,
    pub compute_unit_price_micro_lamports: ComputeUnitPrice,
}
