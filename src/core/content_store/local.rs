//! Content-addressed store on the local file system

use super::traits::ContentStore;
use super::types::{
    ContentMetadata, METADATA_FILENAME, StoredContent, canonical_json, detect_content_type,
    sha256_hex,
};
use crate::config::LocalStoreConfig;
use crate::utils::error::{IssuerError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

/// Files named by the SHA-256 of their bytes
///
/// Storing identical bytes twice writes nothing new and returns the same id.
#[derive(Debug, Clone)]
pub struct LocalContentStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalContentStore {
    /// Create the store, creating its directory if needed
    pub async fn new(config: &LocalStoreConfig) -> Result<Self> {
        let path = PathBuf::from(&config.path);

        if !path.exists() {
            fs::create_dir_all(&path).await.map_err(|e| {
                IssuerError::ContentStore(format!("Failed to create content directory: {}", e))
            })?;
        }

        info!("Local content store initialized at: {}", path.display());
        Ok(Self {
            base_path: path,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Read stored bytes back
    pub async fn get(&self, content_id: &str) -> Result<Vec<u8>> {
        let path = self
            .content_path(content_id)
            .ok_or_else(|| IssuerError::NotFound(format!("Content not found: {}", content_id)))?;

        if !path.exists() {
            return Err(IssuerError::NotFound(format!(
                "Content not found: {}",
                content_id
            )));
        }

        fs::read(&path)
            .await
            .map_err(|e| IssuerError::ContentStore(format!("Failed to read content: {}", e)))
    }

    /// Sidecar metadata of stored content
    pub async fn metadata(&self, content_id: &str) -> Result<ContentMetadata> {
        let path = self
            .metadata_path(content_id)
            .ok_or_else(|| IssuerError::NotFound(format!("Content not found: {}", content_id)))?;

        let content = fs::read_to_string(&path).await.map_err(|_| {
            IssuerError::NotFound(format!("Content metadata not found: {}", content_id))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            IssuerError::ContentStore(format!("Failed to parse content metadata: {}", e))
        })
    }

    fn retrieval_uri(&self, content_id: &str) -> String {
        format!("{}/{}", self.public_base_url, content_id)
    }

    /// Path for a content id; `None` unless the id is a SHA-256 hex digest
    fn content_path(&self, content_id: &str) -> Option<PathBuf> {
        if content_id.len() != 64 || !content_id.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(self.base_path.join(&content_id[..2]).join(content_id))
    }

    fn metadata_path(&self, content_id: &str) -> Option<PathBuf> {
        self.content_path(content_id)
            .map(|path| path.with_extension("meta"))
    }

    async fn store(&self, bytes: &[u8], filename: &str) -> Result<StoredContent> {
        let content_id = sha256_hex(bytes);
        let stored = StoredContent {
            retrieval_uri: self.retrieval_uri(&content_id),
            content_id: content_id.clone(),
            size: bytes.len() as u64,
        };

        let path = self
            .content_path(&content_id)
            .ok_or_else(|| IssuerError::Internal("digest is not a content id".to_string()))?;

        if path.exists() {
            debug!(content_id = %content_id, "Content already stored");
            return Ok(stored);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                IssuerError::ContentStore(format!("Failed to create directory: {}", e))
            })?;
        }

        let metadata = ContentMetadata {
            content_id: content_id.clone(),
            filename: filename.to_string(),
            content_type: detect_content_type(filename).to_string(),
            size: stored.size,
            created_at: chrono::Utc::now(),
        };
        let metadata_json = serde_json::to_vec_pretty(&metadata)?;
        let metadata_path = path.with_extension("meta");
        fs::write(&metadata_path, metadata_json).await.map_err(|e| {
            IssuerError::ContentStore(format!("Failed to write content metadata: {}", e))
        })?;

        // Content file appears last and atomically; its presence marks completion.
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, bytes)
            .await
            .map_err(|e| IssuerError::ContentStore(format!("Failed to write content: {}", e)))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| IssuerError::ContentStore(format!("Failed to commit content: {}", e)))?;

        debug!(content_id = %content_id, filename, size = stored.size, "Content stored");
        Ok(stored)
    }
}

#[async_trait]
impl ContentStore for LocalContentStore {
    fn backend(&self) -> &'static str {
        "local"
    }

    async fn upload(&self, bytes: &[u8], filename: &str) -> Result<StoredContent> {
        self.store(bytes, filename).await
    }

    async fn upload_json(&self, document: &serde_json::Value) -> Result<StoredContent> {
        let bytes = canonical_json(document)?;
        self.store(&bytes, METADATA_FILENAME).await
    }

    async fn health_check(&self) -> Result<()> {
        if !self.base_path.exists() {
            return Err(IssuerError::Unavailable(
                "Content directory does not exist".to_string(),
            ));
        }

        let test_file = self.base_path.join(".health_check");
        fs::write(&test_file, b"health_check")
            .await
            .map_err(|e| IssuerError::Unavailable(format!("Content store not writable: {}", e)))?;
        let _ = fs::remove_file(&test_file).await;

        Ok(())
    }
}
