//! Configuration management for the issuer
//!
//! Configuration comes from a YAML file, environment variables, or both
//! (environment wins).

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{IssuerError, Result};
use std::path::Path;
use tracing::debug;

/// Main configuration struct for the issuer
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Issuer configuration
    pub issuer: IssuerConfig,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| IssuerError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml(&content)?;
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML text without validating it
    pub fn from_yaml(content: &str) -> Result<Self> {
        let issuer: IssuerConfig = serde_yaml::from_str(content)
            .map_err(|e| IssuerError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(Self { issuer })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// An unrecognized `CERTMINT_CONTENT_BACKEND` is an error.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let issuer = &mut self.issuer;

        if let Some(host) = var("CERTMINT_HOST") {
            issuer.server.host = host;
        }
        if let Some(port) = var("CERTMINT_PORT").and_then(|p| p.parse().ok()) {
            issuer.server.port = port;
        }
        if let Some(backend) = var("CERTMINT_CONTENT_BACKEND") {
            match backend.to_lowercase().as_str() {
                "pinata" => issuer.content_store.backend = ContentStoreBackend::Pinata,
                "local" => issuer.content_store.backend = ContentStoreBackend::Local,
                other => {
                    return Err(IssuerError::Config(format!(
                        "Unknown content backend {:?} in CERTMINT_CONTENT_BACKEND, expected pinata or local",
                        other
                    )));
                }
            }
        }
        if let Some(jwt) = var("PINATA_JWT") {
            issuer.content_store.pinata.jwt = jwt;
        }
        if let Some(gateway) = var("PINATA_GATEWAY") {
            issuer.content_store.pinata.gateway = gateway;
        }
        if let Some(path) = var("CERTMINT_CONTENT_DIR") {
            issuer.content_store.local.path = path;
        }
        if let Some(url) = var("CERTMINT_PUBLIC_CONTENT_URL") {
            issuer.content_store.local.public_base_url = url;
        }
        if let Some(rpc_url) = var("CERTMINT_RPC_URL") {
            issuer.ledger.rpc_url = rpc_url;
        }
        if let Some(signer) = var("CERTMINT_SIGNER_ADDRESS") {
            issuer.ledger.signer_address = signer;
        }
        if let Some(explorer) = var("CERTMINT_EXPLORER_URL") {
            issuer.ledger.explorer_url = Some(explorer);
        }
        if let Some(interval) = var("CERTMINT_PACING_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            issuer.pacing.interval_ms = interval;
        }
        if let Some(url) = var("CERTMINT_VERIFY_BASE_URL") {
            issuer.metadata.verify_base_url = url;
        }
        if let Some(dir) = var("CERTMINT_DATA_DIR") {
            issuer.storage.data_dir = dir;
        }
        if let Some(level) = var("CERTMINT_LOG_LEVEL") {
            issuer.logging.level = level;
        }
        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.issuer.server
    }

    /// Get content store configuration
    pub fn content_store(&self) -> &ContentStoreConfig {
        &self.issuer.content_store
    }

    /// Get ledger configuration
    pub fn ledger(&self) -> &LedgerConfig {
        &self.issuer.ledger
    }

    /// Get pacing configuration
    pub fn pacing(&self) -> &PacingConfig {
        &self.issuer.pacing
    }

    /// Get metadata configuration
    pub fn metadata(&self) -> &MetadataConfig {
        &self.issuer.metadata
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.issuer.storage
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.issuer.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");
        self.issuer.validate().map_err(IssuerError::Config)?;
        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.issuer = self.issuer.merge(other.issuer);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.issuer)
            .map_err(|e| IssuerError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
