//! Validators for each configuration section

use super::trait_def::Validate;
use crate::config::models::*;
use crate::core::recipients::Address;
use tracing::debug;
use url::Url;

/// Check that a URL parses and uses http or https
pub fn validate_http_url(value: &str, context: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| format!("{} has invalid URL format: {}", context, e))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            ));
        }
    }

    if url.host_str().is_none() {
        return Err(format!("{} URL must have a valid host", context));
    }

    Ok(())
}

impl Validate for IssuerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating issuer configuration");

        self.server.validate()?;
        self.content_store.validate()?;
        self.ledger.validate()?;
        self.pacing.validate()?;
        self.metadata.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;

        debug!("Issuer configuration validation completed");
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if self.max_upload_size == 0 {
            return Err("Max upload size cannot be 0".to_string());
        }

        if let Some(0) = self.workers {
            return Err("Worker count must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for ContentStoreConfig {
    fn validate(&self) -> Result<(), String> {
        match self.backend {
            ContentStoreBackend::Pinata => {
                let pinata = &self.pinata;
                validate_http_url(&pinata.api_url, "Pinata API")?;
                if pinata.jwt.trim().is_empty() {
                    return Err("Pinata JWT is required for the pinata backend".to_string());
                }
                if pinata.gateway.trim().is_empty() {
                    return Err("Pinata gateway cannot be empty".to_string());
                }
                if pinata.timeout == 0 {
                    return Err("Pinata timeout cannot be 0".to_string());
                }
            }
            ContentStoreBackend::Local => {
                if self.local.path.trim().is_empty() {
                    return Err("Local content store path cannot be empty".to_string());
                }
                validate_http_url(&self.local.public_base_url, "Local content public base")?;
            }
        }
        Ok(())
    }
}

impl Validate for LedgerConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url(&self.rpc_url, "Ledger RPC")?;

        if !Address::is_valid(&self.signer_address) {
            return Err(format!(
                "Ledger signer address is not a valid address: {:?}",
                self.signer_address
            ));
        }

        if self.request_timeout == 0 {
            return Err("Ledger request timeout cannot be 0".to_string());
        }

        if self.confirmation_timeout == 0 {
            return Err("Ledger confirmation timeout cannot be 0".to_string());
        }

        if self.poll_interval_ms == 0 {
            return Err("Ledger poll interval cannot be 0".to_string());
        }

        if let Some(0) = self.gas_limit {
            return Err("Gas limit must be greater than 0".to_string());
        }

        if let Some(explorer) = &self.explorer_url {
            validate_http_url(explorer, "Block explorer")?;
        }

        Ok(())
    }
}

impl Validate for PacingConfig {
    fn validate(&self) -> Result<(), String> {
        match self.strategy {
            PacingStrategy::Disabled => Ok(()),
            PacingStrategy::FixedInterval => Ok(()),
            PacingStrategy::TokenBucket => {
                if self.burst == 0 {
                    return Err("Token bucket burst must be at least 1".to_string());
                }
                if self.interval_ms == 0 {
                    return Err("Token bucket interval must be greater than 0".to_string());
                }
                Ok(())
            }
        }
    }
}

impl Validate for MetadataConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url(&self.verify_base_url, "Verification base")?;
        if self.certificate_type.trim().is_empty() {
            return Err("Certificate type cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.in_memory && self.data_dir.trim().is_empty() {
            return Err("Storage data directory cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}
