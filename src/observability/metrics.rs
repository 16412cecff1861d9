//! Metrics collection.
//!
//! # Metrics
//! - `signer_sign_total` (counter): signing flows by mode, outcome
//! - `signer_network_calls_total` (counter): signing-network RPCs by rpc, outcome
//! - `signer_external_api_total` (counter): quote/swap calls by endpoint, outcome
//!
//! Outcome is `ok` or the failing error kind.

use crate::error::SignerResult;

/// Record the end of a signing flow.
pub fn record_sign<T>(mode: &'static str, result: &SignerResult<T>) {
    metrics::counter!(
        "signer_sign_total",
        "mode" => mode,
        "outcome" => outcome(result)
    )
    .increment(1);
}

/// Record a signing-network RPC.
pub fn record_network_call<T>(rpc: &'static str, result: &SignerResult<T>) {
    metrics::counter!(
        "signer_network_calls_total",
        "rpc" => rpc,
        "outcome" => outcome(result)
    )
    .increment(1);
}

/// Record a quote/swap API call.
pub fn record_external_call<T>(endpoint: &'static str, result: &SignerResult<T>) {
    metrics::counter!(
        "signer_external_api_total",
        "endpoint" => endpoint,
        "outcome" => outcome(result)
    )
    .increment(1);
}

fn outcome<T>(result: &SignerResult<T>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(e) => e.kind().as_str(),
    }
}
