//! Root issuer configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Everything the issuer service needs to run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssuerConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub content_store: ContentStoreConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl IssuerConfig {
    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.content_store = self.content_store.merge(other.content_store);
        self.ledger = self.ledger.merge(other.ledger);
        self.pacing = self.pacing.merge(other.pacing);
        self.metadata = self.metadata.merge(other.metadata);
        self.storage = self.storage.merge(other.storage);
        self.logging = self.logging.merge(other.logging);
        self
    }
}
