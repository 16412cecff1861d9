//! HTTP client for the signing network gateway.
//!
//! # Responsibilities
//! - Perform the connect handshake and remember the connection id
//! - Map each network operation onto one JSON request
//! - Tag every request with a fresh `x-request-id`
//!
//! No timeouts or retries are applied here; callers own both.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::NetworkConfig;
use crate::error::{SignerError, SignerResult};
use crate::network::types::{
    AuthSig, ExportKeyRequest, ExportedKey, GenerateKeyRequest, MintPkpRequest, Pkp, SessionSigs,
    SessionSigsRequest, SignTransactionRequest, WrappedKey,
};
use crate::network::{NetworkConnection, SigningNetwork};
use crate::observability::metrics;

const REQUEST_ID_HEADER: &str = "x-request-id";
const CONNECTION_ID_HEADER: &str = "x-connection-id";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectRequest<'a> {
    network: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectResponse {
    connection_id: String,
    latest_blockhash: String,
}

/// Body wrapper for requests authorised by session signatures.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WithSession<'a, T> {
    pkp_session_sigs: &'a SessionSigs,
    #[serde(flatten)]
    request: &'a T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignTransactionResponse {
    signed_transaction: String,
}

/// Gateway-backed [`SigningNetwork`].
#[derive(Debug, Clone)]
pub struct HttpSigningNetwork {
    http: reqwest::Client,
    base_url: String,
    network_name: String,
}

impl HttpSigningNetwork {
    pub fn new(config: &NetworkConfig) -> SignerResult<Self> {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: &NetworkConfig) -> SignerResult<Self> {
        let url: url::Url = config.gateway_url.parse().map_err(|e| {
            SignerError::InvalidInput(format!("Invalid gateway URL '{}': {}", config.gateway_url, e))
        })?;

        Ok(Self {
            http,
            base_url: url.as_str().trim_end_matches('/').to_string(),
            network_name: config.network_name.clone(),
        })
    }
}

#[async_trait]
impl SigningNetwork for HttpSigningNetwork {
    type Connection = HttpConnection;

    async fn connect(&self) -> SignerResult<HttpConnection> {
        let body = ConnectRequest {
            network: &self.network_name,
        };
        let request = self
            .http
            .post(format!("{}/v1/connect", self.base_url))
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())
            .json(&body);

        let result: SignerResult<ConnectResponse> = send("connect", request).await;
        metrics::record_network_call("connect", &result);
        let handshake = result?;

        tracing::info!(
            network = %self.network_name,
            connection_id = %handshake.connection_id,
            "Connected to signing network"
        );

        Ok(HttpConnection {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            connection_id: handshake.connection_id,
            latest_blockhash: handshake.latest_blockhash,
        })
    }
}

/// An open gateway connection.
#[derive(Debug)]
pub struct HttpConnection {
    http: reqwest::Client,
    base_url: String,
    connection_id: String,
    latest_blockhash: String,
}

impl HttpConnection {
    async fn post<B, R>(&self, rpc: &'static str, path: &str, body: &B) -> SignerResult<R>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let request = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())
            .header(CONNECTION_ID_HEADER, &self.connection_id)
            .json(body);

        let result = send(rpc, request).await;
        metrics::record_network_call(rpc, &result);
        result
    }
}

async fn send<R: DeserializeOwned>(
    rpc: &'static str,
    request: reqwest::RequestBuilder,
) -> SignerResult<R> {
    let response = request
        .send()
        .await
        .map_err(|e| SignerError::network(rpc, e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| SignerError::network(rpc, e.to_string()))?;

    if !status.is_success() {
        return Err(SignerError::network(
            rpc,
            format!("Gateway returned status {}: {}", status, text),
        ));
    }

    serde_json::from_str(&text)
        .map_err(|e| SignerError::network(rpc, format!("Malformed response: {}", e)))
}

#[async_trait]
impl NetworkConnection for HttpConnection {
    fn latest_blockhash(&self) -> &str {
        &self.latest_blockhash
    }

    async fn mint_pkp(&self, auth_sig: &AuthSig) -> SignerResult<Pkp> {
        let body = MintPkpRequest {
            auth_sig: auth_sig.clone(),
        };
        self.post("mint-pkp", "/v1/pkp/mint", &body).await
    }

    async fn issue_session_signatures(
        &self,
        request: &SessionSigsRequest,
    ) -> SignerResult<SessionSigs> {
        self.post("session-sigs", "/v1/session-sigs", request).await
    }

    async fn generate_private_key(
        &self,
        session: &SessionSigs,
        request: &GenerateKeyRequest,
    ) -> SignerResult<WrappedKey> {
        let body = WithSession {
            pkp_session_sigs: session,
            request,
        };
        self.post("generate-key", "/v1/wrapped-keys/generate", &body).await
    }

    async fn export_private_key(
        &self,
        session: &SessionSigs,
        request: &ExportKeyRequest,
    ) -> SignerResult<ExportedKey> {
        let body = WithSession {
            pkp_session_sigs: session,
            request,
        };
        self.post("export-key", "/v1/wrapped-keys/export", &body).await
    }

    async fn sign_transaction(
        &self,
        session: &SessionSigs,
        request: &SignTransactionRequest,
    ) -> SignerResult<String> {
        let body = WithSession {
            pkp_session_sigs: session,
            request,
        };
        let response: SignTransactionResponse = self
            .post("sign-transaction", "/v1/wrapped-keys/sign-transaction", &body)
            .await?;
        Ok(response.signed_transaction)
    }

    async fn disconnect(self) -> SignerResult<()> {
        let result = self
            .http
            .delete(format!("{}/v1/connections/{}", self.base_url, self.connection_id))
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string())
            .send()
            .await
            .map_err(|e| SignerError::network("disconnect", e.to_string()))
            .and_then(|response| {
                if response.status().is_success() {
                    Ok(())
                } else {
                    Err(SignerError::network(
                        "disconnect",
                        format!("Gateway returned status {}", response.status()),
                    ))
                }
            });

        metrics::record_network_call("disconnect", &result);
        result
    }
}
