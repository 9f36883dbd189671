//! Batch orchestrator
//!
//! Runs one recipient file end to end: validate, read the token counter, then
//! bundle and mint for each recipient strictly in order.
//!
//! Recipients of a batch are never processed concurrently, and batches sharing
//! an orchestrator run one at a time behind the signer lock. Other processes
//! minting from the same signing account are not coordinated with; that
//! account must be reserved for one issuer.

use super::phase::{BatchPhase, PhaseTracker};
use super::request::BatchRequest;
use super::types::{AuditStatus, BatchReport, MintOutcome, MintSuccess, format_duration_secs};
use crate::config::MetadataConfig;
use crate::core::content_store::ContentStore;
use crate::core::ledger::MintLedger;
use crate::core::metadata::{CertificateInput, MetadataBundler};
use crate::core::rate_limiter::RateLimiter;
use crate::core::recipients::{RecipientRow, ValidationReport, validate_csv};
use crate::storage::{AuditStore, BatchAuditRecord, DeploymentStore};
use crate::utils::error::{IssuerError, Result};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Drives certificate batches against a content store and a ledger
pub struct BatchOrchestrator {
    store: Arc<dyn ContentStore>,
    ledger: Arc<dyn MintLedger>,
    bundler: MetadataBundler,
    limiter: Arc<RateLimiter>,
    audit: AuditStore,
    deployments: DeploymentStore,
    signer_lock: Mutex<()>,
}

impl BatchOrchestrator {
    pub fn new(
        store: Arc<dyn ContentStore>,
        ledger: Arc<dyn MintLedger>,
        limiter: Arc<RateLimiter>,
        audit: AuditStore,
        deployments: DeploymentStore,
        metadata: MetadataConfig,
    ) -> Self {
        Self {
            bundler: MetadataBundler::new(store.clone(), metadata),
            store,
            ledger,
            limiter,
            audit,
            deployments,
            signer_lock: Mutex::new(()),
        }
    }

    /// Validate a recipient file without touching any external service
    pub fn validate(&self, csv: &str) -> Result<ValidationReport> {
        Ok(validate_csv(csv)?)
    }

    /// Validate the request and file, then run the batch
    ///
    /// Structural and validation problems return `Err` before any upload or
    /// mint. Once running, per-recipient failures land in the report.
    pub async fn execute(&self, request: &BatchRequest, csv: &str) -> Result<BatchReport> {
        request.validate()?;

        let report = validate_csv(csv)?;
        if !report.is_valid() {
            warn!(
                errors = report.errors.len(),
                total = report.row_counts.total,
                "Recipient file rejected"
            );
            return Err(IssuerError::RecipientsRejected(Box::new(report)));
        }

        self.run(request, report.valid_rows).await
    }

    /// Run [`execute`](Self::execute) on its own task
    ///
    /// The batch keeps going and its audit record is written even if the
    /// caller stops waiting for the result.
    pub async fn execute_detached(
        self: Arc<Self>,
        request: BatchRequest,
        csv: String,
    ) -> Result<BatchReport> {
        tokio::spawn(async move { self.execute(&request, &csv).await })
            .await
            .map_err(|e| IssuerError::Internal(format!("Batch task failed: {}", e)))?
    }

    /// Run a batch over recipients that already passed validation
    pub async fn run(
        &self,
        request: &BatchRequest,
        recipients: Vec<RecipientRow>,
    ) -> Result<BatchReport> {
        request.validate()?;
        if recipients.is_empty() {
            return Err(IssuerError::BadRequest(
                "No participant rows found".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(recipients.len());
        if let Some(duplicate) = recipients
            .iter()
            .find(|row| !seen.insert(&row.wallet_address))
        {
            return Err(IssuerError::BadRequest(format!(
                "Duplicate wallet addresses found: {}",
                duplicate.wallet_address
            )));
        }

        let batch_id = Uuid::new_v4();
        let mut phase = PhaseTracker::new(batch_id);

        let _signer = self.signer_lock.lock().await;
        phase.advance(BatchPhase::Preparing)?;

        let contract = &request.contract_address;
        let counter_at_start = self
            .ledger
            .read_token_counter(contract)
            .await
            .map_err(|e| {
                error!(batch_id = %batch_id, contract = %contract, error = %e, "Token counter unavailable");
                IssuerError::Unavailable(format!(
                    "Unable to read token counter from {}: {}",
                    contract, e
                ))
            })?;

        let total = recipients.len();
        if counter_at_start.checked_add(total as u64 - 1).is_none() {
            return Err(IssuerError::BadRequest(format!(
                "Token counter {} leaves no room for {} certificates",
                counter_at_start, total
            )));
        }

        self.store.health_check().await.map_err(|e| {
            error!(batch_id = %batch_id, error = %e, "Content store unavailable");
            IssuerError::Unavailable(format!("Content store unavailable: {}", e))
        })?;
        let contract_name = self.resolve_contract_name(request).await;

        info!(
            batch_id = %batch_id,
            contract = %contract,
            counter_at_start,
            total,
            "Starting certificate batch"
        );

        let start_time = Utc::now();
        let clock = Instant::now();
        let mut successes = Vec::new();
        let mut failures = Vec::new();

        for (index, recipient) in recipients.into_iter().enumerate() {
            phase.advance(BatchPhase::Running { index, total })?;
            let wait = self.limiter.time_until_ready();
            if !wait.is_zero() {
                debug!(batch_id = %batch_id, index, wait_ms = wait.as_millis() as u64, "Pacing next submission");
            }
            let _permit = self.limiter.acquire().await;

            let token_id = counter_at_start + index as u64;
            match self
                .issue_one(request, contract_name.as_deref(), &recipient, token_id)
                .await
            {
                Ok(receipt) => {
                    info!(
                        batch_id = %batch_id,
                        index,
                        token_id,
                        tx_hash = %receipt.transaction_hash,
                        "Certificate minted"
                    );
                    successes.push(MintOutcome::success(index, recipient, token_id, receipt));
                }
                Err(e) => {
                    warn!(
                        batch_id = %batch_id,
                        index,
                        token_id,
                        recipient = %recipient.wallet_address,
                        error = %e,
                        "Certificate failed"
                    );
                    failures.push(MintOutcome::failed(index, recipient, token_id, e.to_string()));
                }
            }
        }

        phase.advance(BatchPhase::Completed)?;
        let duration_ms = clock.elapsed().as_millis() as u64;

        let mut report = BatchReport {
            batch_id,
            event_name: request.event_name.clone(),
            certificate_name: request.certificate_name.clone(),
            contract_address: contract.clone(),
            contract_name,
            counter_at_start,
            total_participants: total,
            successes,
            failures,
            start_time,
            end_time: Utc::now(),
            duration_ms,
            duration: format_duration_secs(duration_ms),
            audit: AuditStatus::Recorded,
        };

        report.audit = match self.audit.append(BatchAuditRecord::from(&report)).await {
            Ok(()) => AuditStatus::Recorded,
            Err(e) => {
                error!(batch_id = %batch_id, error = %e, "Failed to record batch audit");
                AuditStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        info!(
            batch_id = %batch_id,
            succeeded = report.success_count(),
            failed = report.failure_count(),
            duration = %report.duration,
            "Certificate batch completed"
        );
        Ok(report)
    }

    async fn issue_one(
        &self,
        request: &BatchRequest,
        contract_name: Option<&str>,
        recipient: &RecipientRow,
        token_id: u64,
    ) -> Result<MintSuccess> {
        let input = CertificateInput {
            recipient_name: &recipient.name,
            event_name: &request.event_name,
            certificate_name: &request.certificate_name,
            contract_name,
            token_id,
            custom_attributes: &request.custom_attributes,
        };

        let bundle = self
            .bundler
            .bundle(&input, request.template_image.as_ref())
            .await?;

        let receipt = self
            .ledger
            .submit_mint(
                &request.contract_address,
                &recipient.wallet_address,
                bundle.token_uri(),
            )
            .await?;

        Ok(MintSuccess {
            explorer_url: self.ledger.explorer_url(&receipt.transaction_hash),
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            token_uri: bundle.token_uri().to_string(),
            metadata_content_id: bundle.document.content_id,
            image_content_id: bundle.image.map(|image| image.content_id),
        })
    }

    /// Contract name from the request, else from the deployment registry
    async fn resolve_contract_name(&self, request: &BatchRequest) -> Option<String> {
        if let Some(name) = &request.contract_name {
            return Some(name.clone());
        }

        match self
            .deployments
            .get(request.contract_address.as_str())
            .await
        {
            Ok(record) => record.map(|deployment| deployment.contract_name),
            Err(e) => {
                warn!(contract = %request.contract_address, error = %e, "Deployment lookup failed");
                None
            }
        }
    }
}
