//! Gateway client tests against a mock signing-network gateway.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;

use wrapped_key_signer::config::{NetworkConfig, SignerConfig};
use wrapped_key_signer::network::{HttpSigningNetwork, SessionSigsRequest};
use wrapped_key_signer::solana::transaction::decode_transaction;
use wrapped_key_signer::{
    Chain, ErrorKind, SignRequest, SigningMode, SolanaCluster, UnsignedTransaction,
    WrappedKeyGenerator, WrappedKeySigner,
};

mod common;
use common::{KEY_ID, PKP_PUBLIC_KEY};

const CONNECTION_ID: &str = "conn-7f3a";

struct Gateway {
    keypair: Keypair,
    blockhash: String,
    connects: AtomicUsize,
    disconnected: Mutex<Vec<String>>,
    /// Connection ids seen on session-authorised calls.
    connection_headers: Mutex<Vec<String>>,
    request_ids: Mutex<Vec<String>>,
    fail_sign: bool,
}

impl Gateway {
    fn new(fail_sign: bool) -> Arc<Self> {
        Arc::new(Self {
            keypair: Keypair::new(),
            blockhash: "9zkU8suQBdhZVax2DSGNAnyEhEzfEELvA25CJhy5uwnW".to_string(),
            connects: AtomicUsize::new(0),
            disconnected: Mutex::new(Vec::new()),
            connection_headers: Mutex::new(Vec::new()),
            request_ids: Mutex::new(Vec::new()),
            fail_sign,
        })
    }

    fn record(&self, headers: &HeaderMap) {
        if let Some(id) = headers.get("x-connection-id").and_then(|v| v.to_str().ok()) {
            self.connection_headers.lock().unwrap().push(id.to_string());
        }
        if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
            self.request_ids.lock().unwrap().push(id.to_string());
        }
    }
}

async fn connect(State(gw): State<Arc<Gateway>>, Json(body): Json<Value>) -> Json<Value> {
    assert_eq!(body["network"], "datil-dev");
    gw.connects.fetch_add(1, Ordering::SeqCst);
    Json(json!({"connectionId": CONNECTION_ID, "latestBlockhash": gw.blockhash}))
}

async fn session_sigs(
    State(gw): State<Arc<Gateway>>,
    headers: HeaderMap,
    Json(request): Json<SessionSigsRequest>,
) -> Json<Value> {
    gw.record(&headers);
    Json(serde_json::to_value(common::grant(&request)).unwrap())
}

async fn mint_pkp(
    State(gw): State<Arc<Gateway>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    gw.record(&headers);
    Json(json!({
        "tokenId": "0x2a",
        "publicKey": PKP_PUBLIC_KEY,
        "ethAddress": body["authSig"]["address"],
    }))
}

async fn generate(
    State(gw): State<Arc<Gateway>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    gw.record(&headers);
    assert!(body["pkpSessionSigs"]["signatures"].is_object());
    Json(json!({
        "id": KEY_ID,
        "generatedPublicKey": gw.keypair.pubkey().to_string(),
        "pkpAddress": "0x3B8d1f2c6e2a0b4e0b7a6B9e7cF5c4D3A2b1C0d9",
        "network": body["network"],
        "memo": body["memo"],
    }))
}

async fn export(
    State(gw): State<Arc<Gateway>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    gw.record(&headers);
    Json(json!({
        "id": body["id"],
        "decryptedPrivateKey": alloy::hex::encode(gw.keypair.to_bytes()),
        "publicKey": gw.keypair.pubkey().to_string(),
        "keyType": "ed25519",
    }))
}

async fn sign_transaction(
    State(gw): State<Arc<Gateway>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    gw.record(&headers);
    if gw.fail_sign {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "action execution failed".to_string()));
    }

    assert_eq!(body["network"], "solana");
    assert!(body["pkpSessionSigs"].is_object());
    let payload = body["unsignedTransaction"]["serializedTransaction"]
        .as_str()
        .unwrap_or_default();
    let signed = common::sign_message_payload(&gw.keypair, payload)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(Json(json!({"signedTransaction": signed})))
}

async fn disconnect(State(gw): State<Arc<Gateway>>, Path(id): Path<String>) -> StatusCode {
    gw.disconnected.lock().unwrap().push(id);
    StatusCode::NO_CONTENT
}

async fn start_gateway(gateway: Arc<Gateway>) -> String {
    let router = Router::new()
        .route("/v1/connect", post(connect))
        .route("/v1/session-sigs", post(session_sigs))
        .route("/v1/pkp/mint", post(mint_pkp))
        .route("/v1/wrapped-keys/generate", post(generate))
        .route("/v1/wrapped-keys/export", post(export))
        .route("/v1/wrapped-keys/sign-transaction", post(sign_transaction))
        .route("/v1/connections/{id}", delete(disconnect))
        .with_state(gateway);

    common::serve(router).await
}

fn settings(gateway_url: String) -> SignerConfig {
    SignerConfig {
        network: NetworkConfig {
            gateway_url,
            ..NetworkConfig::default()
        },
        ..SignerConfig::default()
    }
}

fn request(gateway: &Gateway) -> SignRequest {
    SignRequest {
        pkp_public_key: PKP_PUBLIC_KEY.to_string(),
        chain: Chain::Solana,
        key_id: KEY_ID.to_string(),
        transaction: UnsignedTransaction::new(
            common::unsigned_transaction(&gateway.keypair.pubkey()),
            SolanaCluster::Devnet,
        ),
        broadcast: false,
    }
}

#[tokio::test]
async fn test_sign_through_gateway_both_modes() {
    for mode in [SigningMode::Native, SigningMode::LocalExport] {
        let gateway = Gateway::new(false);
        let base = start_gateway(gateway.clone()).await;
        let config = common::config_with(settings(base));

        let network = HttpSigningNetwork::new(&config.settings.network).unwrap();
        let signed = WrappedKeySigner::new(&config, network)
            .unwrap()
            .with_mode(mode)
            .sign(&request(&gateway))
            .await
            .unwrap();

        let transaction = decode_transaction(signed.as_str()).unwrap();
        assert!(transaction.verify_with_results().into_iter().all(|ok| ok));

        assert_eq!(gateway.connects.load(Ordering::SeqCst), 1);
        assert_eq!(*gateway.disconnected.lock().unwrap(), vec![CONNECTION_ID.to_string()]);
        assert!(gateway
            .connection_headers
            .lock()
            .unwrap()
            .iter()
            .all(|id| id == CONNECTION_ID));
    }
}

#[tokio::test]
async fn test_request_ids_are_unique() {
    let gateway = Gateway::new(false);
    let base = start_gateway(gateway.clone()).await;
    let config = common::config_with(settings(base));

    let network = HttpSigningNetwork::new(&config.settings.network).unwrap();
    WrappedKeySigner::new(&config, network)
        .unwrap()
        .sign(&request(&gateway))
        .await
        .unwrap();

    let mut ids = gateway.request_ids.lock().unwrap().clone();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(total, 2);
    assert_eq!(ids.len(), total);
}

#[tokio::test]
async fn test_gateway_failure_still_disconnects() {
    let gateway = Gateway::new(true);
    let base = start_gateway(gateway.clone()).await;
    let config = common::config_with(settings(base));

    let network = HttpSigningNetwork::new(&config.settings.network).unwrap();
    let err = WrappedKeySigner::new(&config, network)
        .unwrap()
        .sign(&request(&gateway))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.to_string().contains("sign-transaction"));
    assert!(err.to_string().contains("action execution failed"));
    assert_eq!(gateway.disconnected.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_generator_through_gateway() {
    let gateway = Gateway::new(false);
    let base = start_gateway(gateway.clone()).await;
    let config = common::config_with(settings(base));
    let network = HttpSigningNetwork::new(&config.settings.network).unwrap();

    let generator = WrappedKeyGenerator::new(&config, &network).unwrap();
    let pkp = generator.mint_pkp().await.unwrap();
    assert_eq!(pkp.public_key, PKP_PUBLIC_KEY);
    assert_eq!(pkp.eth_address, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    let key = generator
        .generate(&pkp.public_key, Chain::Solana, "gateway test")
        .await
        .unwrap();
    assert_eq!(key.network, Chain::Solana);
    assert_eq!(key.generated_public_key, gateway.keypair.pubkey().to_string());
    assert_eq!(key.memo, "gateway test");

    assert_eq!(gateway.connects.load(Ordering::SeqCst), 2);
    assert_eq!(gateway.disconnected.lock().unwrap().len(), 2);
}
