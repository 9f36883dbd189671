//! Deployment registry and batch audit records

use super::traits::Record;
use crate::core::batch::{BatchOutcome, BatchReport, MintResult};
use crate::core::recipients::Address;
use crate::utils::error::{IssuerError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Symbol recorded when a deployment names none
pub const DEFAULT_CONTRACT_SYMBOL: &str = "CERT";

/// A certificate contract known to the issuer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub contract_address: Address,
    pub contract_name: String,
    pub contract_symbol: String,
    pub network: String,
    pub deployer: Option<Address>,
    pub owner: Option<Address>,
    pub transaction_hash: Option<String>,
    pub block_number: Option<u64>,
    pub deployed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Record for DeploymentRecord {
    fn record_id(&self) -> String {
        self.contract_address.to_string()
    }
}

/// Registration request for a deployed contract
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeployment {
    pub contract_address: Option<String>,
    pub contract_name: Option<String>,
    pub contract_symbol: Option<String>,
    pub network: Option<String>,
    pub deployer: Option<String>,
    pub owner: Option<String>,
    pub transaction_hash: Option<String>,
    pub block_number: Option<u64>,
    pub deployed_at: Option<DateTime<Utc>>,
}

impl NewDeployment {
    /// Check required fields and build the record
    pub fn into_record(self, now: DateTime<Utc>) -> Result<DeploymentRecord> {
        let required = |value: Option<String>, field: &str| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| IssuerError::BadRequest(format!("Missing required field: {}", field)))
        };
        let optional_address = |value: Option<String>, field: &str| -> Result<Option<Address>> {
            match value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                Some(raw) => Address::parse(raw)
                    .map(Some)
                    .map_err(|_| IssuerError::BadRequest(format!("Invalid {}: {}", field, raw))),
                None => Ok(None),
            }
        };

        let raw_address = required(self.contract_address, "contractAddress")?;
        let contract_address = Address::parse(&raw_address).map_err(|_| {
            IssuerError::BadRequest(format!("Invalid contractAddress: {}", raw_address))
        })?;
        let contract_name = required(self.contract_name, "contractName")?;
        let network = required(self.network, "network")?;
        let deployer = optional_address(self.deployer, "deployer")?;
        let owner = optional_address(self.owner, "owner")?.or_else(|| deployer.clone());

        Ok(DeploymentRecord {
            contract_address,
            contract_name,
            contract_symbol: self
                .contract_symbol
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_CONTRACT_SYMBOL.to_string()),
            network,
            deployer,
            owner,
            transaction_hash: self.transaction_hash.filter(|h| !h.trim().is_empty()),
            block_number: self.block_number,
            deployed_at: self.deployed_at.unwrap_or(now),
            created_at: now,
        })
    }
}

/// A recipient that did not receive a certificate, kept for resubmission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedRecipient {
    pub name: String,
    pub wallet_address: Address,
    /// Projected id that was never consumed
    pub token_id: u64,
    pub error_message: String,
}

/// Summary of one completed batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAuditRecord {
    pub batch_id: Uuid,
    pub event_name: String,
    pub certificate_name: String,
    pub contract_address: Address,
    pub contract_name: Option<String>,
    pub counter_at_start: u64,
    pub total_participants: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub outcome: BatchOutcome,
    pub transaction_hashes: Vec<String>,
    pub failed_recipients: Vec<FailedRecipient>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Record for BatchAuditRecord {
    fn record_id(&self) -> String {
        self.batch_id.to_string()
    }
}

impl From<&BatchReport> for BatchAuditRecord {
    fn from(report: &BatchReport) -> Self {
        let transaction_hashes = report
            .successes
            .iter()
            .filter_map(|outcome| match &outcome.result {
                MintResult::Success(receipt) => Some(receipt.transaction_hash.clone()),
                MintResult::Failed(_) => None,
            })
            .collect();

        let failed_recipients = report
            .failures
            .iter()
            .filter_map(|outcome| match &outcome.result {
                MintResult::Failed(failure) => Some(FailedRecipient {
                    name: outcome.recipient.name.clone(),
                    wallet_address: outcome.recipient.wallet_address.clone(),
                    token_id: outcome.token_id,
                    error_message: failure.error_message.clone(),
                }),
                MintResult::Success(_) => None,
            })
            .collect();

        Self {
            batch_id: report.batch_id,
            event_name: report.event_name.clone(),
            certificate_name: report.certificate_name.clone(),
            contract_address: report.contract_address.clone(),
            contract_name: report.contract_name.clone(),
            counter_at_start: report.counter_at_start,
            total_participants: report.total_participants,
            succeeded: report.successes.len(),
            failed: report.failures.len(),
            outcome: report.outcome(),
            transaction_hashes,
            failed_recipients,
            start_time: report.start_time,
            end_time: report.end_time,
        }
    }
}
