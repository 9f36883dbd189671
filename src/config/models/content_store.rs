//! Content store configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Which content store backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStoreBackend {
    /// Pinata IPFS pinning service
    #[default]
    Pinata,
    /// Content-addressed files on local disk
    Local,
}

/// Content store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentStoreConfig {
    /// Selected backend
    #[serde(default)]
    pub backend: ContentStoreBackend,
    /// Pinata settings
    #[serde(default)]
    pub pinata: PinataConfig,
    /// Local store settings
    #[serde(default)]
    pub local: LocalStoreConfig,
}

impl ContentStoreConfig {
    /// Merge content store configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.backend != ContentStoreBackend::default() {
            self.backend = other.backend;
        }
        self.pinata = self.pinata.merge(other.pinata);
        self.local = self.local.merge(other.local);
        self
    }
}

/// Pinata pinning API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinataConfig {
    /// API base URL
    #[serde(default = "default_pinata_api_url")]
    pub api_url: String,
    /// Bearer JWT
    #[serde(default)]
    pub jwt: String,
    /// Gateway host used to build retrieval URIs
    #[serde(default = "default_pinata_gateway")]
    pub gateway: String,
    /// Request timeout in seconds
    #[serde(default = "default_upload_timeout")]
    pub timeout: u64,
}

impl Default for PinataConfig {
    fn default() -> Self {
        Self {
            api_url: default_pinata_api_url(),
            jwt: String::new(),
            gateway: default_pinata_gateway(),
            timeout: default_upload_timeout(),
        }
    }
}

impl PinataConfig {
    /// Merge Pinata configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.api_url != default_pinata_api_url() {
            self.api_url = other.api_url;
        }
        if !other.jwt.is_empty() {
            self.jwt = other.jwt;
        }
        if other.gateway != default_pinata_gateway() {
            self.gateway = other.gateway;
        }
        if other.timeout != default_upload_timeout() {
            self.timeout = other.timeout;
        }
        self
    }
}

/// Local content store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStoreConfig {
    /// Directory holding stored content
    #[serde(default = "default_content_path")]
    pub path: String,
    /// URL prefix under which stored content is served
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for LocalStoreConfig {
    fn default() -> Self {
        Self {
            path: default_content_path(),
            public_base_url: default_public_base_url(),
        }
    }
}

impl LocalStoreConfig {
    /// Merge local store configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.path != default_content_path() {
            self.path = other.path;
        }
        if other.public_base_url != default_public_base_url() {
            self.public_base_url = other.public_base_url;
        }
        self
    }
}
