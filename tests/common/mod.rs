//! Shared fixtures for integration tests.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, TxHash};
use lock_deploy::blockchain::{BlockchainError, BlockchainResult};
use lock_deploy::contract::{ContractDeployer, Deployment, DeploymentRequest};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// ABI of the Hardhat sample `Lock` contract.
pub const LOCK_ABI: &str = r#"[
    {"inputs":[{"internalType":"uint256","name":"_unlockTime","type":"uint256"}],"stateMutability":"payable","type":"constructor"},
    {"anonymous":false,"inputs":[{"indexed":false,"internalType":"uint256","name":"amount","type":"uint256"},{"indexed":false,"internalType":"uint256","name":"when","type":"uint256"}],"name":"Withdrawal","type":"event"},
    {"inputs":[],"name":"owner","outputs":[{"internalType":"address payable","name":"","type":"address"}],"stateMutability":"view","type":"function"},
    {"inputs":[],"name":"unlockTime","outputs":[{"internalType":"uint256","name":"","type":"uint256"}],"stateMutability":"view","type":"function"},
    {"inputs":[],"name":"withdraw","outputs":[],"stateMutability":"nonpayable","type":"function"}
]"#;

/// Stand-in creation bytecode (the Solidity free memory pointer preamble).
pub const LOCK_BYTECODE: &str = "0x6080604052";

/// Write a Hardhat-style artifact for `Lock` under `root`.
pub fn write_lock_artifact(root: &Path) {
    let dir = root.join("contracts").join("Lock.sol");
    fs::create_dir_all(&dir).unwrap();
    let json = format!(
        r#"{{"_format":"hh-sol-artifact-1","contractName":"Lock","sourceName":"contracts/Lock.sol","abi":{},"bytecode":"{}","deployedBytecode":"0x","linkReferences":{{}},"deployedLinkReferences":{{}}}}"#,
        LOCK_ABI, LOCK_BYTECODE
    );
    fs::write(dir.join("Lock.json"), json).unwrap();
}

/// Deployer double that records requests and replays a canned outcome.
pub struct ScriptedDeployer {
    outcome: Box<dyn Fn() -> BlockchainResult<Deployment> + Send + Sync>,
    pub requests: Mutex<Vec<DeploymentRequest>>,
    pub calls: AtomicUsize,
}

impl ScriptedDeployer {
    pub fn succeeding(deployment: Deployment) -> Self {
        Self::new(move || Ok(deployment.clone()))
    }

    pub fn failing(make_error: fn() -> BlockchainError) -> Self {
        Self::new(move || Err(make_error()))
    }

    fn new(outcome: impl Fn() -> BlockchainResult<Deployment> + Send + Sync + 'static) -> Self {
        Self {
            outcome: Box::new(outcome),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }
}

impl ContractDeployer for ScriptedDeployer {
    async fn deploy(&self, request: DeploymentRequest) -> BlockchainResult<Deployment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        (self.outcome)()
    }
}

/// Hash every canned node reports for `eth_sendRawTransaction`.
pub const SENT_TX_HASH: TxHash = TxHash::repeat_byte(0xab);

/// JSON-RPC node that answers each method from a fixed table.
///
/// Methods missing from the table get a `-32601` error. Every request's
/// method name is recorded.
pub struct RpcNode {
    pub url: String,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RpcNode {
    pub async fn start(replies: HashMap<&'static str, Value>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let calls = Arc::new(Mutex::new(Vec::new()));
        let replies = Arc::new(replies);

        let recorded = calls.clone();
        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((socket, _)) => {
                        let replies = replies.clone();
                        let recorded = recorded.clone();
                        tokio::spawn(async move {
                            serve(socket, &replies, &recorded).await;
                        });
                    }
                    Err(_) => break,
                }
            }
        });

        Self { url, calls }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.calls().iter().any(|m| m == method)
    }
}

async fn serve(mut socket: TcpStream, replies: &HashMap<&'static str, Value>, calls: &Mutex<Vec<String>>) {
    let Some(body) = read_body(&mut socket).await else {
        return;
    };
    let Ok(request) = serde_json::from_slice::<Value>(&body) else {
        return;
    };

    let response = match request {
        Value::Array(batch) => Value::Array(batch.iter().map(|r| answer(r, replies, calls)).collect()),
        single => answer(&single, replies, calls),
    };

    let body = response.to_string();
    let response_str = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = socket.write_all(response_str.as_bytes()).await;
    let _ = socket.shutdown().await;
}

fn answer(request: &Value, replies: &HashMap<&'static str, Value>, calls: &Mutex<Vec<String>>) -> Value {
    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request.get("method").and_then(Value::as_str).unwrap_or_default();
    calls.lock().unwrap().push(method.to_string());

    match replies.get(method) {
        Some(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
        None => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": -32601, "message": format!("method {method} not found")}
        }),
    }
}

async fn read_body(socket: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length: usize = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse().ok())?;

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    Some(buf[header_end..header_end + content_length].to_vec())
}

/// Replies for a healthy local dev node on chain 31337 holding 1 ETH for
/// the sender. Everything needed to fill, sign and broadcast a transaction
/// is present. Receipts are absent until a test adds one.
pub fn dev_node_replies() -> HashMap<&'static str, Value> {
    let gwei = "0x3b9aca00";
    HashMap::from([
        ("eth_chainId", json!("0x7a69")),
        ("eth_getBalance", json!("0xde0b6b3a7640000")),
        ("eth_blockNumber", json!("0x1")),
        ("eth_getTransactionCount", json!("0x0")),
        ("eth_estimateGas", json!("0x30000")),
        ("eth_gasPrice", json!(gwei)),
        ("eth_maxPriorityFeePerGas", json!(gwei)),
        (
            "eth_feeHistory",
            json!({
                "oldestBlock": "0x1",
                "baseFeePerGas": [gwei, gwei],
                "gasUsedRatio": [0.5],
                "reward": [[gwei]]
            }),
        ),
        ("eth_sendRawTransaction", json!(SENT_TX_HASH)),
    ])
}

/// Receipt for [`SENT_TX_HASH`] mined in `block`.
pub fn receipt(success: bool, contract_address: Option<Address>, block: u64) -> Value {
    let status = if success { "0x1" } else { "0x0" };
    json!({
        "transactionHash": SENT_TX_HASH,
        "transactionIndex": "0x0",
        "blockHash": TxHash::repeat_byte(0x11),
        "blockNumber": format!("{:#x}", block),
        "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "to": null,
        "cumulativeGasUsed": "0x30000",
        "gasUsed": "0x30000",
        "effectiveGasPrice": "0x3b9aca00",
        "contractAddress": contract_address,
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "status": status,
        "type": "0x2"
    })
}
