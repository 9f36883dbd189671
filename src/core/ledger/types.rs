//! Ledger types

use serde::{Deserialize, Serialize};

/// Confirmed mint transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintReceipt {
    pub transaction_hash: String,
    pub block_number: u64,
    pub gas_used: u64,
}

/// Subset of `eth_getTransactionReceipt` the issuer reads
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    pub block_number: Option<String>,
    #[serde(default)]
    pub gas_used: Option<String>,
    /// `0x1` success, `0x0` reverted
    #[serde(default)]
    pub status: Option<String>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// JSON-RPC response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}
