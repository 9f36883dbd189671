//! Content store types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Filename recorded for uploaded metadata documents
pub const METADATA_FILENAME: &str = "certificate-metadata.json";

/// Result of storing one piece of content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredContent {
    /// Identifier derived from the content
    pub content_id: String,
    /// Publicly resolvable URI of the content
    pub retrieval_uri: String,
    /// Stored size in bytes
    pub size: u64,
}

/// Sidecar record kept next to locally stored content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub content_id: String,
    pub filename: String,
    pub content_type: String,
    pub size: u64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Rebuild a JSON value with object keys in sorted order
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Compact canonical bytes of a JSON document
pub fn canonical_json(value: &Value) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&canonicalize(value))
}

/// Detect content type from filename
pub fn detect_content_type(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Hex SHA-256 of some bytes
pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
