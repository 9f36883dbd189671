//! Service wiring
//!
//! Builds the content store, ledger client, pacer, record stores and batch
//! orchestrator from configuration and keeps them together for the server and
//! the CLI.

use crate::config::Config;
use crate::core::batch::BatchOrchestrator;
use crate::core::content_store::{ContentStore, LocalContentStore, build_content_store};
use crate::core::ledger::{JsonRpcLedger, MintLedger};
use crate::core::rate_limiter::RateLimiter;
use crate::storage::RecordStores;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Shared handles to every issuer component
#[derive(Clone)]
pub struct IssuerServices {
    pub content_store: Arc<dyn ContentStore>,
    /// Present when content is stored on local disk and served by this process
    pub local_content: Option<Arc<LocalContentStore>>,
    pub ledger: Arc<dyn MintLedger>,
    pub records: RecordStores,
    pub orchestrator: Arc<BatchOrchestrator>,
}

impl IssuerServices {
    /// Build every component described by the configuration
    pub async fn from_config(config: &Config) -> Result<Self> {
        let (content_store, local_content) = build_content_store(config.content_store()).await?;
        let ledger: Arc<dyn MintLedger> = Arc::new(JsonRpcLedger::new(config.ledger())?);
        let records = RecordStores::open(config.storage()).await?;

        info!(
            backend = content_store.backend(),
            rpc_url = %config.ledger().rpc_url,
            pacing = ?config.pacing().strategy,
            "Issuer services initialized"
        );

        Ok(Self::assemble(
            content_store,
            local_content,
            ledger,
            records,
            RateLimiter::new(config.pacing().clone()),
            config,
        ))
    }

    /// Assemble services around already-built components
    pub fn assemble(
        content_store: Arc<dyn ContentStore>,
        local_content: Option<Arc<LocalContentStore>>,
        ledger: Arc<dyn MintLedger>,
        records: RecordStores,
        limiter: RateLimiter,
        config: &Config,
    ) -> Self {
        let orchestrator = Arc::new(BatchOrchestrator::new(
            content_store.clone(),
            ledger.clone(),
            Arc::new(limiter),
            records.batches.clone(),
            records.deployments.clone(),
            config.metadata().clone(),
        ));

        Self {
            content_store,
            local_content,
            ledger,
            records,
            orchestrator,
        }
    }
}
