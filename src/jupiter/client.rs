//! Quote and swap-build HTTP client.
//!
//! # Responsibilities
//! - Fetch a quote, then build the matching unsigned swap transaction
//! - Fail fast on an embedded `error` field or a missing payload field
//!
//! Single attempt per call, no retries.

use serde_json::Value;

use crate::config::JupiterConfig;
use crate::error::{SignerError, SignerResult};
use crate::jupiter::types::{ComputeUnitPrice, Quote, QuoteRequest, SwapRequest};
use crate::observability::metrics;
use crate::solana::{SolanaCluster, UnsignedTransaction};

const QUOTE: &str = "quote";
const SWAP: &str = "swap";

/// DEX aggregator client.
#[derive(Debug, Clone)]
pub struct JupiterClient {
    http: reqwest::Client,
    base_url: String,
    wrap_and_unwrap_sol: bool,
    compute_unit_price: ComputeUnitPrice,
}

impl JupiterClient {
    pub fn new(config: &JupiterConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: &JupiterConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            wrap_and_unwrap_sol: config.wrap_and_unwrap_sol,
            compute_unit_price: config.compute_unit_price_micro_lamports.into(),
        }
    }

    /// `GET /v6/quote`.
    pub async fn quote(&self, request: &QuoteRequest) -> SignerResult<Quote> {
        let result = async {
            let response = self
                .http
                .get(format!("{}/v6/quote", self.base_url))
                .query(&request.query())
                .send()
                .await
                .map_err(|e| SignerError::external(QUOTE, e.to_string()))?;

            let body = read_body(QUOTE, response).await?;
            if body.get("outAmount").is_none() {
                return Err(SignerError::external(QUOTE, "Response is missing outAmount"));
            }
            Ok(Quote::new(body))
        }
        .await;

        metrics::record_external_call(QUOTE, &result);
        let quote = result.inspect_err(|e| tracing::error!(error = %e, "Quote request failed"))?;

        tracing::info!(
            input_mint = %request.input_mint,
            output_mint = %request.output_mint,
            amount = request.amount,
            out_amount = quote.out_amount().unwrap_or_default(),
            "Quote received"
        );
        Ok(quote)
    }

    /// `POST /v6/swap`; returns the base64 unsigned transaction.
    pub async fn swap_transaction(&self, quote: &Quote, user_public_key: &str) -> SignerResult<String> {
        let body = SwapRequest {
            quote_response: quote.raw(),
            user_public_key,
            wrap_and_unwrap_sol: self.wrap_and_unwrap_sol,
            compute_unit_price_micro_lamports: self.compute_unit_price,
        };

        let result = async {
            let response = self
                .http
                .post(format!("{}/v6/swap", self.base_url))
                .json(&body)
                .send()
                .await
                .map_err(|e| SignerError::external(SWAP, e.to_string()))?;

            let body = read_body(SWAP, response).await?;
            body.get("swapTransaction")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| SignerError::external(SWAP, "Response is missing swapTransaction"))
        }
        .await;

        metrics::record_external_call(SWAP, &result);
        result.inspect_err(|e| tracing::error!(error = %e, "Swap build failed"))
    }

    /// Quote then build: an unsigned mainnet-beta swap for `user_public_key`.
    pub async fn fetch_swap(
        &self,
        request: &QuoteRequest,
        user_public_key: &str,
    ) -> SignerResult<UnsignedTransaction> {
        let quote = self.quote(request).await?;
        let transaction = self.swap_transaction(&quote, user_public_key).await?;
        Ok(UnsignedTransaction::new(transaction, SolanaCluster::MainnetBeta))
    }
}

/// Parse a JSON body and surface an embedded `error` field.
async fn read_body(endpoint: &'static str, response: reqwest::Response) -> SignerResult<Value> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| SignerError::external(endpoint, e.to_string()))?;

    let body: Value = match serde_json::from_str(&text) {
        Ok(body) => body,
        Err(_) => {
            return Err(SignerError::external(
                endpoint,
                format!("Unexpected response (status {}): {}", status, text),
            ))
        }
    };

    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        let message = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(SignerError::external(endpoint, message));
    }

    if !status.is_success() {
        return Err(SignerError::external(
            endpoint,
            format!("Request failed with status {}", status),
        ));
    }

    Ok(body)
}
