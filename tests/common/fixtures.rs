//! Test fixtures and data factories

use super::fakes::ScriptedLedger;
use certmint::config::{Config, LocalStoreConfig};
use certmint::core::content_store::LocalContentStore;
use certmint::core::rate_limiter::RateLimiter;
use certmint::core::recipients::Address;
use certmint::storage::{BatchAuditRecord, DeploymentRecord, JsonFileRecordStore, RecordStores};
use certmint::IssuerServices;
use std::sync::Arc;
use tempfile::TempDir;

/// Deterministic address for the `n`th test participant
pub fn address(n: u64) -> String {
    format!("0x{:040x}", n)
}

/// `count` recipients named `Participant 1..=count`
pub fn numbered_recipients(count: u64) -> Vec<(String, String)> {
    (1..=count)
        .map(|n| (format!("Participant {}", n), address(n)))
        .collect()
}

/// Recipient file for the given rows
pub fn csv_for(rows: &[(String, String)]) -> String {
    let mut text = String::from("participant_name,wallet_address\n");
    for (name, wallet) in rows {
        text.push_str(&format!("{},{}\n", name, wallet));
    }
    text
}

/// Issuer wired to a temporary local content store and JSON record files
pub struct LocalHarness {
    pub dir: TempDir,
    pub local: Arc<LocalContentStore>,
    pub ledger: Arc<ScriptedLedger>,
    pub services: IssuerServices,
}

impl LocalHarness {
    pub async fn new(ledger: ScriptedLedger) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let local = Arc::new(
            LocalContentStore::new(&LocalStoreConfig {
                path: dir.path().join("content").to_string_lossy().into_owned(),
                public_base_url: "http://issuer.test/content".to_string(),
            })
            .await
            .expect("local store"),
        );

        let records = RecordStores {
            deployments: Arc::new(
                JsonFileRecordStore::<DeploymentRecord>::open(dir.path().join("data/deployments.json"))
                    .await
                    .expect("deployment store"),
            ),
            batches: Arc::new(
                JsonFileRecordStore::<BatchAuditRecord>::open(dir.path().join("data/batches.json"))
                    .await
                    .expect("batch store"),
            ),
        };

        let mut config = Config::default();
        config.issuer.metadata.verify_base_url = "https://certs.test".to_string();

        let ledger = Arc::new(ledger);
        let services = IssuerServices::assemble(
            local.clone(),
            Some(local.clone()),
            ledger.clone(),
            records,
            RateLimiter::disabled(),
            &config,
        );

        Self {
            dir,
            local,
            ledger,
            services,
        }
    }

    pub fn contract() -> Address {
        Address::parse("0xcccccccccccccccccccccccccccccccccccccccc").expect("contract address")
    }
}
