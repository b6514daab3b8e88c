use actix_web::web;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};

use crate::blockchain::{Header, Work};
use crate::engine::Engine;

/// Shared application state: the single mining engine behind one lock.
pub struct AppState {
    pub engine: Mutex<Engine>,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, Engine>, RpcError> {
        self.engine
            .lock()
            .map_err(|_| RpcError::internal("engine lock poisoned"))
    }

    /// Run `f` against the engine on the blocking pool. A submission that
    /// crosses an epoch holds the lock for the whole cache build.
    pub async fn read<T, F>(state: &web::Data<Self>, f: F) -> Result<T, RpcError>
    where
        F: FnOnce(&Engine) -> T + Send + 'static,
        T: Send + 'static,
    {
        let state = state.clone();
        web::block(move || state.lock().map(|engine| f(&engine)))
            .await
            .map_err(|e| RpcError::internal(e.to_string()))?
    }
}

/* ---------- Hex helpers ---------- */

/// `0x`-prefixed, full-width hex of raw bytes.
pub fn hex_data(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// `0x`-prefixed quantity without leading zeros (`0x0` for zero).
pub fn hex_quantity(value: U256) -> String {
    let digits = hex::encode(value.to_be_bytes::<32>());
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{trimmed}")
    }
}

/* ---------- JSON-RPC envelope ---------- */

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// Method call body. The `id` is read from the raw object so that an explicit
/// `null` id is not mistaken for a notification.
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl RpcResponse {
    pub fn from_result(id: Value, outcome: Result<Value, RpcError>) -> Self {
        match outcome {
            Ok(result) => Self {
                jsonrpc: "2.0",
                id,
                result: Some(result),
                error: None,
            },
            Err(error) => Self::error(id, error),
        }
    }

    pub fn error(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(error),
        }
    }
}

/* ---------- Mining models ---------- */

/// `eth_getWork` result: `[seal hash, seed hash, target]`.
#[derive(Debug, Serialize)]
pub struct WorkResponse(pub String, pub String, pub String);

impl From<&Work> for WorkResponse {
    fn from(work: &Work) -> Self {
        Self(
            hex_data(work.seal_hash),
            hex_data(work.seed_hash),
            hex_data(work.target.to_be_bytes::<32>()),
        )
    }
}

/* ---------- Chain models ---------- */

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockResponse {
    pub number: String,
    pub hash: String,
    pub parent_hash: String,
    pub sha3_uncles: String,
    pub miner: String,
    pub state_root: String,
    pub transactions_root: String,
    pub receipts_root: String,
    pub logs_bloom: String,
    pub difficulty: String,
    pub gas_limit: String,
    pub gas_used: String,
    pub timestamp: String,
    pub nonce: String,
    pub mix_hash: String,
    pub extra_data: String,
    pub transactions: Vec<Value>,
    pub uncles: Vec<Value>,
}

impl From<&Header> for BlockResponse {
    fn from(h: &Header) -> Self {
        Self {
            number: hex_quantity(h.number),
            hash: hex_data(h.hash()),
            parent_hash: hex_data(h.parent_hash),
            sha3_uncles: hex_data(h.uncles_hash),
            miner: hex_data(h.coinbase),
            state_root: hex_data(h.state_root),
            transactions_root: hex_data(h.tx_root),
            receipts_root: hex_data(h.receipt_root),
            logs_bloom: hex_data(h.logs_bloom),
            difficulty: hex_quantity(h.difficulty),
            gas_limit: hex_quantity(U256::from(h.gas_limit)),
            gas_used: hex_quantity(U256::from(h.gas_used)),
            timestamp: hex_quantity(U256::from(h.timestamp)),
            nonce: hex_data(h.nonce),
            mix_hash: hex_data(h.mix_hash),
            extra_data: "0x".to_string(),
            transactions: Vec::new(),
            uncles: Vec::new(),
        }
    }
}

/* ---------- Stats models ---------- */

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub number: String,
    pub epoch: u64,
    pub full_size: u64,
    pub cache_bytes: usize,
    pub window_len: usize,
    pub last_rate: Option<f64>,
    pub rate_div: u64,
    pub target: String,
}
