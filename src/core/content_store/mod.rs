//! Content-addressed storage for certificate images and metadata documents

mod local;
mod pinata;
mod traits;
mod types;


pub use local::LocalContentStore;
pub use pinata::{PinResponse, PinataContentStore};
pub use traits::ContentStore;
#[cfg(test)]
pub use traits::MockContentStore;
pub use types::{
    ContentMetadata, METADATA_FILENAME, StoredContent, canonical_json, canonicalize,
    detect_content_type, sha256_hex,
};

use crate::config::{ContentStoreBackend, ContentStoreConfig};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Build the configured content store
///
/// The local store is also returned concretely so the server can serve its files.
pub async fn build_content_store(
    config: &ContentStoreConfig,
) -> Result<(Arc<dyn ContentStore>, Option<Arc<LocalContentStore>>)> {
    match config.backend {
        ContentStoreBackend::Pinata => {
            info!(gateway = %config.pinata.gateway, "Using Pinata content store");
            let store = PinataContentStore::new(&config.pinata)?;
            Ok((Arc::new(store), None))
        }
        ContentStoreBackend::Local => {
            let store = Arc::new(LocalContentStore::new(&config.local).await?);
            Ok((store.clone(), Some(store)))
        }
    }
}
