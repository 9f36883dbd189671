//! Certificate issuance pipeline
//!
//! Recipient validation, metadata bundling, content storage, ledger access,
//! submission pacing and the batch orchestrator that ties them together.

pub mod batch;
pub mod content_store;
pub mod ledger;
pub mod metadata;
pub mod rate_limiter;
pub mod recipients;
