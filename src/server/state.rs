//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::services::IssuerServices;
use std::sync::Arc;

/// State shared by every request handler
#[derive(Clone)]
pub struct AppState {
    /// Issuer configuration (shared read-only)
    pub config: Arc<Config>,
    /// Issuer components
    pub services: IssuerServices,
}

impl AppState {
    pub fn new(config: Config, services: IssuerServices) -> Self {
        Self {
            config: Arc::new(config),
            services,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Largest accepted multipart upload in bytes
    pub fn max_upload_size(&self) -> usize {
        self.config.server().max_upload_size
    }
}
