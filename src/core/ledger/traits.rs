//! Ledger seam

use super::types::MintReceipt;
use crate::core::recipients::Address;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Minting contract on a ledger, submitted to by one signing account
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MintLedger: Send + Sync {
    /// Next token id the contract will assign
    async fn read_token_counter(&self, contract: &Address) -> Result<u64>;

    /// Mint one certificate and wait until the transaction is confirmed
    ///
    /// Returns only after the outcome is known: a receipt on success, an
    /// error on revert, rejection or confirmation timeout.
    async fn submit_mint(
        &self,
        contract: &Address,
        recipient: &Address,
        metadata_uri: &str,
    ) -> Result<MintReceipt>;

    /// Latest block number, as a liveness check
    async fn health_check(&self) -> Result<u64>;

    /// Explorer link for a transaction, when an explorer is configured
    fn explorer_url(&self, transaction_hash: &str) -> Option<String>;
}
