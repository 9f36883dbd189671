//! Record store seam

use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A persisted record with a stable identifier
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Identifier unique within one store
    fn record_id(&self) -> String;
}

/// Append-only collection of records
///
/// Appending a record whose id already exists fails with `Conflict`.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Fetch one record by id
    async fn get(&self, id: &str) -> Result<Option<R>>;

    /// All records in insertion order
    async fn list(&self) -> Result<Vec<R>>;

    /// Add a new record
    async fn append(&self, record: R) -> Result<()>;

    /// Remove a record; `false` when it did not exist
    async fn delete(&self, id: &str) -> Result<bool>;
}
