//! Ledger (JSON-RPC node) configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ledger client configuration
///
/// Transactions are signed by the node for `signer_address`; no key material
/// is held here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Account the node signs mint transactions with
    #[serde(default)]
    pub signer_address: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout: u64,
    /// How long to wait for a receipt, in seconds
    #[serde(default = "default_confirmation_timeout")]
    pub confirmation_timeout: u64,
    /// Receipt polling interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Fixed gas limit; the node estimates when absent
    pub gas_limit: Option<u64>,
    /// Block explorer base URL
    pub explorer_url: Option<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            signer_address: String::new(),
            request_timeout: default_timeout(),
            confirmation_timeout: default_confirmation_timeout(),
            poll_interval_ms: default_poll_interval_ms(),
            gas_limit: None,
            explorer_url: None,
        }
    }
}

impl LedgerConfig {
    /// Merge ledger configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.rpc_url != default_rpc_url() {
            self.rpc_url = other.rpc_url;
        }
        if !other.signer_address.is_empty() {
            self.signer_address = other.signer_address;
        }
        if other.request_timeout != default_timeout() {
            self.request_timeout = other.request_timeout;
        }
        if other.confirmation_timeout != default_confirmation_timeout() {
            self.confirmation_timeout = other.confirmation_timeout;
        }
        if other.poll_interval_ms != default_poll_interval_ms() {
            self.poll_interval_ms = other.poll_interval_ms;
        }
        if other.gas_limit.is_some() {
            self.gas_limit = other.gas_limit;
        }
        if other.explorer_url.is_some() {
            self.explorer_url = other.explorer_url;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
