//! JSON-RPC ledger client using a node-managed signer

use super::abi::{
    decode_uint_word, encode_mint_call, encode_token_counter_call, parse_quantity, to_quantity,
};
use super::traits::MintLedger;
use super::types::{MintReceipt, RpcResponse, TransactionReceipt};
use crate::config::LedgerConfig;
use crate::core::recipients::Address;
use crate::utils::error::{IssuerError, Result};
use crate::utils::net::create_client;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Ledger client speaking Ethereum JSON-RPC
///
/// Transactions go through `eth_sendTransaction`, so the node holds the
/// signer's key.
#[derive(Debug)]
pub struct JsonRpcLedger {
    client: reqwest::Client,
    rpc_url: String,
    signer: Address,
    gas_limit: Option<u64>,
    confirmation_timeout: Duration,
    poll_interval: Duration,
    explorer_url: Option<String>,
    next_id: AtomicU64,
}

impl JsonRpcLedger {
    /// Create a client from configuration
    pub fn new(config: &LedgerConfig) -> Result<Self> {
        let signer = Address::parse(&config.signer_address)
            .map_err(|e| IssuerError::Config(format!("Ledger signer: {}", e)))?;
        let client = create_client(config.request_timeout())?;

        Ok(Self {
            client,
            rpc_url: config.rpc_url.clone(),
            signer,
            gas_limit: config.gas_limit,
            confirmation_timeout: config.confirmation_timeout(),
            poll_interval: config.poll_interval(),
            explorer_url: config
                .explorer_url
                .as_ref()
                .map(|url| url.trim_end_matches('/').to_string()),
            next_id: AtomicU64::new(1),
        })
    }

    /// Signing account
    pub fn signer(&self) -> &Address {
        &self.signer
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        debug!(method, id, "Sending JSON-RPC request");
        let response = self
            .client
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| IssuerError::from_http(method, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IssuerError::Ledger(format!(
                "{} returned HTTP {}",
                method, status
            )));
        }

        let envelope: RpcResponse = response
            .json()
            .await
            .map_err(|e| IssuerError::Ledger(format!("{} returned malformed JSON: {}", method, e)))?;

        if let Some(error) = envelope.error {
            return Err(IssuerError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        serde_json::from_value(envelope.result.unwrap_or(Value::Null)).map_err(|e| {
            IssuerError::Ledger(format!("{} returned an unexpected result: {}", method, e))
        })
    }

    async fn wait_for_receipt(&self, hash: &str) -> Result<TransactionReceipt> {
        let deadline = Instant::now() + self.confirmation_timeout;
        let mut last_error: Option<IssuerError> = None;

        loop {
            match self
                .call::<Option<TransactionReceipt>>("eth_getTransactionReceipt", json!([hash]))
                .await
            {
                Ok(Some(receipt)) if receipt.block_number.is_some() => return Ok(receipt),
                Ok(_) => {}
                Err(e) => {
                    warn!(tx_hash = hash, error = %e, "Receipt poll failed");
                    last_error = Some(e);
                }
            }

            if Instant::now() >= deadline {
                let detail = last_error
                    .map(|e| format!(" (last error: {})", e))
                    .unwrap_or_default();
                return Err(IssuerError::Timeout(format!(
                    "transaction {} not confirmed within {}s{}",
                    hash,
                    self.confirmation_timeout.as_secs(),
                    detail
                )));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl MintLedger for JsonRpcLedger {
    async fn read_token_counter(&self, contract: &Address) -> Result<u64> {
        let data: String = self
            .call(
                "eth_call",
                json!([
                    { "to": contract.as_str(), "data": encode_token_counter_call() },
                    "latest"
                ]),
            )
            .await?;

        let counter = decode_uint_word(&data)?;
        debug!(contract = %contract, counter, "Read token counter");
        Ok(counter)
    }

    async fn submit_mint(
        &self,
        contract: &Address,
        recipient: &Address,
        metadata_uri: &str,
    ) -> Result<MintReceipt> {
        let mut transaction = json!({
            "from": self.signer.as_str(),
            "to": contract.as_str(),
            "data": encode_mint_call(recipient, metadata_uri),
        });
        if let Some(gas) = self.gas_limit {
            transaction["gas"] = Value::String(to_quantity(gas));
        }

        let hash: String = self.call("eth_sendTransaction", json!([transaction])).await?;
        info!(tx_hash = %hash, recipient = %recipient, "Mint transaction submitted");

        let receipt = self.wait_for_receipt(&hash).await?;
        let block_number = receipt
            .block_number
            .as_deref()
            .map(parse_quantity)
            .transpose()?
            .unwrap_or_default();

        if receipt.status.as_deref() == Some("0x0") {
            return Err(IssuerError::Ledger(format!(
                "transaction {} reverted in block {}",
                hash, block_number
            )));
        }

        let gas_used = receipt
            .gas_used
            .as_deref()
            .map(parse_quantity)
            .transpose()?
            .unwrap_or_default();

        Ok(MintReceipt {
            transaction_hash: receipt.transaction_hash,
            block_number,
            gas_used,
        })
    }

    async fn health_check(&self) -> Result<u64> {
        let block: String = self.call("eth_blockNumber", json!([])).await?;
        parse_quantity(&block)
    }

    fn explorer_url(&self, transaction_hash: &str) -> Option<String> {
        self.explorer_url
            .as_ref()
            .map(|base| format!("{}/tx/{}", base, transaction_hash))
    }
}
