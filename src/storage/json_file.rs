//! Record store persisted as one JSON array file

use super::traits::{Record, RecordStore};
use crate::utils::error::{IssuerError, Result};
use async_trait::async_trait;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Whole-file JSON store
///
/// Every write rewrites the file through a temporary sibling and a rename, so
/// readers never see a half-written array.
#[derive(Debug)]
pub struct JsonFileRecordStore<R> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Record> JsonFileRecordStore<R> {
    /// Open (or lazily create) the store at `path`
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                IssuerError::Storage(format!("Failed to create data directory: {}", e))
            })?;
        }

        info!("JSON record store at: {}", path.display());
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<R>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(IssuerError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            IssuerError::Storage(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    async fn save(&self, records: &[R]) -> Result<()> {
        let content = serde_json::to_vec_pretty(records)?;
        let temp_path = self.path.with_extension("json.tmp");

        fs::write(&temp_path, content)
            .await
            .map_err(|e| IssuerError::Storage(format!("Failed to write records: {}", e)))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| IssuerError::Storage(format!("Failed to commit records: {}", e)))?;

        debug!(count = records.len(), path = %self.path.display(), "Records saved");
        Ok(())
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for JsonFileRecordStore<R> {
    async fn get(&self, id: &str) -> Result<Option<R>> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .find(|record| record.record_id() == id))
    }

    async fn list(&self) -> Result<Vec<R>> {
        self.load().await
    }

    async fn append(&self, record: R) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let id = record.record_id();
        if records.iter().any(|existing| existing.record_id() == id) {
            return Err(IssuerError::Conflict(format!("Record {} already exists", id)));
        }

        records.push(record);
        self.save(&records).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let before = records.len();
        records.retain(|record| record.record_id() != id);
        if records.len() == before {
            return Ok(false);
        }

        self.save(&records).await?;
        Ok(true)
    }
}
