//! Batch report types

use crate::core::recipients::{Address, RecipientRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a token id was actually consumed on the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenIdStatus {
    /// The mint confirmed; the ledger assigned this id
    Minted,
    /// The id this recipient would have received; never consumed
    Projected,
}

/// Receipts for a confirmed certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintSuccess {
    pub transaction_hash: String,
    pub block_number: u64,
    pub gas_used: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
    pub token_uri: String,
    pub metadata_content_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_content_id: Option<String>,
}

/// Why a recipient did not receive a certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintFailure {
    pub error_message: String,
}

/// Success or failure of one recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MintResult {
    Success(MintSuccess),
    Failed(MintFailure),
}

/// Outcome for one recipient of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintOutcome {
    /// Position within the batch
    pub index: usize,
    pub recipient: RecipientRow,
    /// `counterAtStart + index`
    pub token_id: u64,
    pub token_id_status: TokenIdStatus,
    #[serde(flatten)]
    pub result: MintResult,
}

impl MintOutcome {
    pub fn success(index: usize, recipient: RecipientRow, token_id: u64, receipt: MintSuccess) -> Self {
        Self {
            index,
            recipient,
            token_id,
            token_id_status: TokenIdStatus::Minted,
            result: MintResult::Success(receipt),
        }
    }

    pub fn failed(
        index: usize,
        recipient: RecipientRow,
        token_id: u64,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            index,
            recipient,
            token_id,
            token_id_status: TokenIdStatus::Projected,
            result: MintResult::Failed(MintFailure {
                error_message: error_message.into(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.result, MintResult::Success(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.result {
            MintResult::Failed(failure) => Some(&failure.error_message),
            MintResult::Success(_) => None,
        }
    }
}

/// Overall result category of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOutcome {
    FullSuccess,
    PartialSuccess,
    FullFailure,
}

/// Whether the batch's audit record was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuditStatus {
    Recorded,
    Failed { error: String },
}

/// Result of one completed batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub batch_id: Uuid,
    pub event_name: String,
    pub certificate_name: String,
    pub contract_address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_name: Option<String>,
    pub counter_at_start: u64,
    pub total_participants: usize,
    pub successes: Vec<MintOutcome>,
    pub failures: Vec<MintOutcome>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_ms: u64,
    /// Rounded seconds, e.g. `"12s"`
    pub duration: String,
    pub audit: AuditStatus,
}

impl BatchReport {
    /// Tri-state outcome category
    pub fn outcome(&self) -> BatchOutcome {
        match (self.successes.is_empty(), self.failures.is_empty()) {
            (_, true) => BatchOutcome::FullSuccess,
            (false, false) => BatchOutcome::PartialSuccess,
            (true, false) => BatchOutcome::FullFailure,
        }
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Human-readable summary line
    pub fn message(&self) -> String {
        format!(
            "Bulk minting completed. {} successful, {} failed.",
            self.success_count(),
            self.failure_count()
        )
    }

    /// Recipients to resubmit in a new batch
    pub fn failed_recipients(&self) -> Vec<&RecipientRow> {
        self.failures.iter().map(|outcome| &outcome.recipient).collect()
    }
}

/// Rounded whole seconds, as shown to callers
pub fn format_duration_secs(duration_ms: u64) -> String {
    format!("{}s", (duration_ms + 500) / 1000)
}
