//! Pinata IPFS pinning client

use super::traits::ContentStore;
use super::types::{METADATA_FILENAME, StoredContent, canonicalize, detect_content_type};
use crate::config::PinataConfig;
use crate::utils::error::{IssuerError, Result};
use crate::utils::net::create_client;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Pin response returned by both pinning endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct PinResponse {
    #[serde(rename = "IpfsHash")]
    pub ipfs_hash: String,
    #[serde(rename = "PinSize", default)]
    pub pin_size: u64,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<String>,
    #[serde(rename = "isDuplicate", default)]
    pub is_duplicate: Option<bool>,
}

/// Content store backed by the Pinata pinning service
#[derive(Debug, Clone)]
pub struct PinataContentStore {
    client: reqwest::Client,
    api_url: String,
    jwt: String,
    gateway: String,
}

impl PinataContentStore {
    /// Create a client from configuration
    pub fn new(config: &PinataConfig) -> Result<Self> {
        if config.jwt.trim().is_empty() {
            return Err(IssuerError::Config(
                "Pinata JWT is not configured".to_string(),
            ));
        }

        let client = create_client(Duration::from_secs(config.timeout))?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            jwt: config.jwt.clone(),
            gateway: config.gateway.trim_end_matches('/').to_string(),
        })
    }

    /// Gateway URI for a CID
    pub fn gateway_uri(&self, cid: &str) -> String {
        if self.gateway.starts_with("http://") || self.gateway.starts_with("https://") {
            format!("{}/ipfs/{}", self.gateway, cid)
        } else {
            format!("https://{}/ipfs/{}", self.gateway, cid)
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    async fn pin(&self, request: reqwest::RequestBuilder, what: &str) -> Result<StoredContent> {
        let response = request
            .bearer_auth(&self.jwt)
            .send()
            .await
            .map_err(|e| IssuerError::from_http(&format!("Failed to upload {} to IPFS", what), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Pinata rejected {} upload", what);
            return Err(IssuerError::ContentStore(format!(
                "Failed to upload {} to IPFS: {} {}",
                what,
                status,
                body.trim()
            )));
        }

        let pinned: PinResponse = response.json().await.map_err(|e| {
            IssuerError::ContentStore(format!("Unexpected Pinata response: {}", e))
        })?;

        if pinned.ipfs_hash.is_empty() {
            return Err(IssuerError::ContentStore(
                "Pinata response carried no IpfsHash".to_string(),
            ));
        }

        debug!(
            cid = %pinned.ipfs_hash,
            size = pinned.pin_size,
            duplicate = pinned.is_duplicate.unwrap_or(false),
            "Pinned {}", what
        );

        Ok(StoredContent {
            retrieval_uri: self.gateway_uri(&pinned.ipfs_hash),
            content_id: pinned.ipfs_hash,
            size: pinned.pin_size,
        })
    }
}

#[async_trait]
impl ContentStore for PinataContentStore {
    fn backend(&self) -> &'static str {
        "pinata"
    }

    async fn upload(&self, bytes: &[u8], filename: &str) -> Result<StoredContent> {
        let part = Part::bytes(bytes.to_vec())
            .file_name(filename.to_string())
            .mime_str(detect_content_type(filename))
            .map_err(|e| IssuerError::Internal(format!("Invalid MIME type: {}", e)))?;

        let form = Form::new()
            .part("file", part)
            .text("pinataMetadata", json!({ "name": filename }).to_string());

        let request = self
            .client
            .post(self.endpoint("pinning/pinFileToIPFS"))
            .multipart(form);

        self.pin(request, "image").await
    }

    async fn upload_json(&self, document: &serde_json::Value) -> Result<StoredContent> {
        let body = json!({
            "pinataContent": canonicalize(document),
            "pinataMetadata": { "name": METADATA_FILENAME },
        });

        let request = self
            .client
            .post(self.endpoint("pinning/pinJSONToIPFS"))
            .json(&body);

        self.pin(request, "metadata").await
    }

    async fn health_check(&self) -> Result<()> {
        let response = self
            .client
            .get(self.endpoint("data/testAuthentication"))
            .bearer_auth(&self.jwt)
            .send()
            .await
            .map_err(|e| IssuerError::from_http("Pinata health check", e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(IssuerError::Unavailable(format!(
                "Pinata authentication failed: {}",
                response.status()
            )))
        }
    }
}
