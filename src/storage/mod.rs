//! Record persistence for the issuer
//!
//! Deployment registry and batch audit trail, behind the `RecordStore` seam.

mod json_file;
mod memory;
mod records;
mod traits;


pub use json_file::JsonFileRecordStore;
pub use memory::MemoryRecordStore;
pub use records::{
    BatchAuditRecord, DEFAULT_CONTRACT_SYMBOL, DeploymentRecord, FailedRecipient, NewDeployment,
};
pub use traits::{Record, RecordStore};

use crate::config::StorageConfig;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Deployment registry handle
pub type DeploymentStore = Arc<dyn RecordStore<DeploymentRecord>>;
/// Batch audit trail handle
pub type AuditStore = Arc<dyn RecordStore<BatchAuditRecord>>;

/// The issuer's record stores
#[derive(Clone)]
pub struct RecordStores {
    pub deployments: DeploymentStore,
    pub batches: AuditStore,
}

impl RecordStores {
    /// Open the stores described by configuration
    pub async fn open(config: &StorageConfig) -> Result<Self> {
        if config.in_memory {
            info!("Using in-memory record stores");
            return Ok(Self::in_memory());
        }

        let deployments =
            JsonFileRecordStore::<DeploymentRecord>::open(config.deployments_file()).await?;
        let batches = JsonFileRecordStore::<BatchAuditRecord>::open(config.batches_file()).await?;
        Ok(Self {
            deployments: Arc::new(deployments),
            batches: Arc::new(batches),
        })
    }

    /// Fresh empty in-memory stores
    pub fn in_memory() -> Self {
        Self {
            deployments: Arc::new(MemoryRecordStore::<DeploymentRecord>::new()),
            batches: Arc::new(MemoryRecordStore::<BatchAuditRecord>::new()),
        }
    }
}
