//! In-memory record store

use super::traits::{Record, RecordStore};
use crate::utils::error::{IssuerError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;

/// Records held in process memory
#[derive(Debug)]
pub struct MemoryRecordStore<R> {
    records: RwLock<Vec<R>>,
}

impl<R> Default for MemoryRecordStore<R> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<R: Record> MemoryRecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with existing records
    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryRecordStore<R> {
    async fn get(&self, id: &str) -> Result<Option<R>> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|record| record.record_id() == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<R>> {
        Ok(self.records.read().clone())
    }

    async fn append(&self, record: R) -> Result<()> {
        let mut records = self.records.write();
        let id = record.record_id();
        if records.iter().any(|existing| existing.record_id() == id) {
            return Err(IssuerError::Conflict(format!("Record {} already exists", id)));
        }
        records.push(record);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|record| record.record_id() != id);
        Ok(records.len() != before)
    }
}
