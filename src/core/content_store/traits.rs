//! Content store seam

use super::types::StoredContent;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Write-once content-addressed storage for certificate images and documents
///
/// Implementations must return a retrieval URI that resolves to exactly the
/// uploaded bytes for as long as certificates reference it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Backend name for logs and readiness output
    fn backend(&self) -> &'static str;

    /// Store raw bytes
    async fn upload(&self, bytes: &[u8], filename: &str) -> Result<StoredContent>;

    /// Store a JSON document in canonical form
    async fn upload_json(&self, document: &serde_json::Value) -> Result<StoredContent>;

    /// Check the backend is reachable and accepts writes
    async fn health_check(&self) -> Result<()>;
}
