//! Request handlers for the mint API.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http::server::AppState;
use crate::mint::types::MintOutcome;
use crate::mint::{is_valid_address, is_valid_token_uri};

/// Incoming mint request body. Fields are optional so that missing ones can
/// be reported with a single message instead of a serde parse error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintBody {
    pub recipient_address: Option<String>,
    #[serde(rename = "tokenURI")]
    pub token_uri: Option<String>,
}

/// Outgoing mint response. Absent optionals are omitted, not null.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MintResponse {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            transaction_hash: None,
            block_number: None,
            token_id: None,
            error: Some(error.into()),
        }
    }
}

/// `POST /api/mint`: submit a mint and wait for confirmation.
pub async fn mint(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<MintResponse>) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if !content_type.contains("application/json") {
        return (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Json(MintResponse::failure("Content-Type must be application/json")),
        );
    }

    let body: MintBody = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(MintResponse::failure("Request body must be valid JSON")),
            );
        }
    };

    let (recipient_address, token_uri) = match (body.recipient_address, body.token_uri) {
        (Some(address), Some(uri)) => (address, uri),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(MintResponse::failure(
                    "Both recipientAddress and tokenURI are required",
                )),
            );
        }
    };

    if !is_valid_address(&recipient_address) {
        return (
            StatusCode::BAD_REQUEST,
            Json(MintResponse::failure("Invalid recipient address format")),
        );
    }

    if !is_valid_token_uri(&token_uri) {
        return (
            StatusCode::BAD_REQUEST,
            Json(MintResponse::failure(
                "Token URI must start with ipfs://, http://, or https://",
            )),
        );
    }

    let Some(contract) = state.contract else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MintResponse::failure(
                "Server misconfigured: missing contract address",
            )),
        );
    };

    // Format already validated above; a parse failure here would mean the
    // validator and the address type disagree.
    let recipient = match recipient_address.parse() {
        Ok(address) => address,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(MintResponse::failure("Invalid recipient address format")),
            );
        }
    };

    match state.submitter.mint(contract, recipient, &token_uri).await {
        MintOutcome::Success {
            transaction_hash,
            block_number,
            token_id,
        } => (
            StatusCode::OK,
            Json(MintResponse {
                success: true,
                transaction_hash: Some(transaction_hash.to_string()),
                block_number: Some(block_number.to_string()),
                token_id: token_id.map(|id| id.to_string()),
                error: None,
            }),
        ),
        MintOutcome::Failure { error } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MintResponse::failure(error)),
        ),
    }
}

/// `GET /api/mint`: readiness and configured contract.
pub async fn mint_status(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ready",
        "chainId": state.chain_id,
        "contract": state.contract.map(|c| c.to_string()),
    }))
}

/// `GET /api/operator`: operator balance and contract owner probe.
pub async fn operator(
    State(state): State<AppState>,
) -> (StatusCode, Json<serde_json::Value>) {
    match state.submitter.get_account_balance().await {
        Ok(balance) => {
            let contract_owner = match state.contract {
                Some(contract) => state.submitter.verify_contract_owner(contract).await,
                None => None,
            };
            (
                StatusCode::OK,
                Json(json!({
                    "address": state.submitter.operator_address().map(|a| a.to_string()),
                    "balanceWei": balance.to_string(),
                    "contractOwner": contract_owner.map(|a| a.to_string()),
                })),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": crate::mint::classify::classify(&e) })),
        ),
    }
}

/// `GET /health`: liveness. Does no RPC; health polling must neither
/// initialize the operator context nor depend on chain availability.
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "operatorInitialized": state.submitter.is_initialized(),
    }))
}
