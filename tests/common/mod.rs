//! Shared utilities for integration testing: an in-process JSON-RPC chain
//! simulator with a per-method call log.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::keccak256;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use mint_relay::config::BlockchainConfig;

/// Well-known test private key (Anvil's first account).
pub const TEST_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Address derived from [`TEST_PRIVATE_KEY`].
pub const OPERATOR_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

/// Collection contract used by the tests.
pub const CONTRACT_ADDRESS: &str = "0x2Fcb8200b5B20F2eC53c80D95941eC7aE8145d26";

/// Owner address the simulator reports for `eth_call` probes.
pub const CONTRACT_OWNER: &str = "0x00000000000000000000000000000000000000aa";

/// keccak256("Transfer(address,address,uint256)")
pub const TRANSFER_TOPIC: &str =
    "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

/// Programmable JSON-RPC chain double.
///
/// Answers the handful of methods the relay uses with canned values, and
/// records every method name so tests can assert what was (and was not)
/// called.
pub struct ChainSim {
    /// JSON-RPC method names in arrival order.
    pub calls: Mutex<Vec<String>>,
    /// Raw transaction hex captured from `eth_sendRawTransaction`.
    pub raw_txs: Mutex<Vec<String>>,
    /// Height reported by `eth_blockNumber`.
    pub block_number: AtomicU64,
    /// Block every receipt claims inclusion in.
    pub receipt_block: u64,
    /// Whether receipts report status 1.
    pub receipt_status_ok: AtomicBool,
    /// Logs attached to every receipt.
    pub receipt_logs: Mutex<Vec<Value>>,
    /// Error message returned by `eth_estimateGas`, if set.
    pub estimate_error: Mutex<Option<String>>,
    /// Error message returned by `eth_sendRawTransaction`, if set.
    pub send_error: Mutex<Option<String>>,
    /// When set, every request is answered with HTTP 403.
    pub deny_all: AtomicBool,
    /// Chain id reported by `eth_chainId`.
    pub chain_id: u64,
    /// Transaction count reported for the operator account.
    pub account_nonce: u64,
}

impl ChainSim {
    /// A chain two blocks past the receipt block, so a depth-2 confirmation
    /// wait completes on the first poll.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            raw_txs: Mutex::new(Vec::new()),
            block_number: AtomicU64::new(102),
            receipt_block: 100,
            receipt_status_ok: AtomicBool::new(true),
            receipt_logs: Mutex::new(Vec::new()),
            estimate_error: Mutex::new(None),
            send_error: Mutex::new(None),
            deny_all: AtomicBool::new(false),
            chain_id: 31337,
            account_nonce: 5,
        })
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

/// Start the simulator on an ephemeral port.
pub async fn start_chain(sim: Arc<ChainSim>) -> SocketAddr {
    let app = Router::new().route("/", post(rpc_handler)).with_state(sim);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Relay chain config pointed at the simulator, with a short poll interval
/// and the test key injected directly (no environment involved).
pub fn chain_config(rpc: SocketAddr) -> BlockchainConfig {
    BlockchainConfig {
        rpc_url: format!("http://{}", rpc),
        chain_id: 31337,
        rpc_timeout_secs: 5,
        confirmation_blocks: 2,
        confirmation_timeout_secs: 10,
        receipt_poll_interval_ms: 25,
        private_key: Some(TEST_PRIVATE_KEY.to_string()),
        ..BlockchainConfig::default()
    }
}

/// Build a Transfer event log entry as the RPC would report it.
pub fn transfer_log(from: &str, to: &str, token_id: u64) -> Value {
    json!({
        "address": CONTRACT_ADDRESS,
        "topics": [
            TRANSFER_TOPIC,
            address_topic(from),
            address_topic(to),
            format!("0x{:064x}", token_id),
        ],
        "data": "0x",
        "blockNumber": "0x64",
        "transactionHash": format!("0x{}", "11".repeat(32)),
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "22".repeat(32)),
        "logIndex": "0x0",
        "removed": false,
    })
}

fn address_topic(address: &str) -> String {
    format!("0x{:0>64}", address.trim_start_matches("0x"))
}

fn receipt_json(tx_hash: Value, block: u64, status_ok: bool, logs: Vec<Value>) -> Value {
    json!({
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "22".repeat(32)),
        "blockNumber": format!("0x{:x}", block),
        "from": OPERATOR_ADDRESS,
        "to": CONTRACT_ADDRESS,
        "cumulativeGasUsed": "0x30d40",
        "gasUsed": "0x30d40",
        "contractAddress": null,
        "logs": logs,
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "type": "0x0",
        "status": if status_ok { "0x1" } else { "0x0" },
        "effectiveGasPrice": "0x3b9aca00",
    })
}

async fn rpc_handler(
    State(sim): State<Arc<ChainSim>>,
    Json(req): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if sim.deny_all.load(Ordering::SeqCst) {
        return (StatusCode::FORBIDDEN, Json(json!({ "error": "forbidden" })));
    }

    let id = req.get("id").cloned().unwrap_or(json!(1));
    let method = req["method"].as_str().unwrap_or("").to_string();
    sim.calls.lock().unwrap().push(method.clone());

    let result: Result<Value, String> = match method.as_str() {
        "eth_chainId" => Ok(json!(format!("0x{:x}", sim.chain_id))),
        "eth_blockNumber" => Ok(json!(format!(
            "0x{:x}",
            sim.block_number.load(Ordering::SeqCst)
        ))),
        // 1 gwei
        "eth_gasPrice" => Ok(json!("0x3b9aca00")),
        // 1 ether
        "eth_getBalance" => Ok(json!("0xde0b6b3a7640000")),
        "eth_getTransactionCount" => Ok(json!(format!("0x{:x}", sim.account_nonce))),
        "eth_estimateGas" => match sim.estimate_error.lock().unwrap().clone() {
            Some(message) => Err(message),
            None => Ok(json!("0x30d40")),
        },
        "eth_sendRawTransaction" => match sim.send_error.lock().unwrap().clone() {
            Some(message) => Err(message),
            None => {
                let raw = req["params"][0].as_str().unwrap_or("").to_string();
                let bytes = alloy::primitives::hex::decode(raw.trim_start_matches("0x"))
                    .expect("raw tx hex");
                let hash = keccak256(&bytes);
                sim.raw_txs.lock().unwrap().push(raw);
                Ok(json!(hash.to_string()))
            }
        },
        "eth_getTransactionReceipt" => {
            let tx_hash = req["params"][0].clone();
            let logs = sim.receipt_logs.lock().unwrap().clone();
            Ok(receipt_json(
                tx_hash,
                sim.receipt_block,
                sim.receipt_status_ok.load(Ordering::SeqCst),
                logs,
            ))
        }
        "eth_call" => Ok(json!(address_topic(CONTRACT_OWNER))),
        other => Err(format!("method {} not supported by ChainSim", other)),
    };

    let body = match result {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err(message) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32000, "message": message },
        }),
    };
    (StatusCode::OK, Json(body))
}
