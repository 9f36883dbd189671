//! Test doubles for the ledger seam

use async_trait::async_trait;
use certmint::core::ledger::{MintLedger, MintReceipt};
use certmint::core::recipients::Address;
use certmint::{IssuerError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One mint the ledger accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintCall {
    pub contract: Address,
    pub recipient: Address,
    pub metadata_uri: String,
}

/// Ledger that confirms every mint except the scripted failures
pub struct ScriptedLedger {
    counter: u64,
    counter_unavailable: bool,
    failures: HashMap<Address, String>,
    minted: Mutex<Vec<MintCall>>,
    counter_reads: AtomicUsize,
}

impl ScriptedLedger {
    pub fn new(counter: u64) -> Self {
        Self {
            counter,
            counter_unavailable: false,
            failures: HashMap::new(),
            minted: Mutex::new(Vec::new()),
            counter_reads: AtomicUsize::new(0),
        }
    }

    /// Confirmation of mints to `recipient` times out
    pub fn timing_out_for(mut self, recipient: &Address) -> Self {
        self.failures.insert(
            recipient.clone(),
            "transaction not confirmed within 120s".to_string(),
        );
        self
    }

    /// The counter read fails as if the node were down
    pub fn unreachable(mut self) -> Self {
        self.counter_unavailable = true;
        self
    }

    pub fn minted(&self) -> Vec<MintCall> {
        self.minted.lock().clone()
    }

    pub fn counter_reads(&self) -> usize {
        self.counter_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MintLedger for ScriptedLedger {
    async fn read_token_counter(&self, _contract: &Address) -> Result<u64> {
        self.counter_reads.fetch_add(1, Ordering::SeqCst);
        if self.counter_unavailable {
            return Err(IssuerError::Unavailable("connection refused".to_string()));
        }
        Ok(self.counter + self.minted.lock().len() as u64)
    }

    async fn submit_mint(
        &self,
        contract: &Address,
        recipient: &Address,
        metadata_uri: &str,
    ) -> Result<MintReceipt> {
        if let Some(message) = self.failures.get(recipient) {
            return Err(IssuerError::Timeout(message.clone()));
        }

        let mut minted = self.minted.lock();
        minted.push(MintCall {
            contract: contract.clone(),
            recipient: recipient.clone(),
            metadata_uri: metadata_uri.to_string(),
        });
        let n = minted.len() as u64;

        Ok(MintReceipt {
            transaction_hash: format!("0x{:064x}", n),
            block_number: 1_000 + n,
            gas_used: 90_000,
        })
    }

    async fn health_check(&self) -> Result<u64> {
        Ok(1_000)
    }

    fn explorer_url(&self, transaction_hash: &str) -> Option<String> {
        Some(format!("https://explorer.test/tx/{}", transaction_hash))
    }
}
