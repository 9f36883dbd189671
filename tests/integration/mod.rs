//! Integration tests for certmint
//!
//! These tests drive the public API across module boundaries: the batch
//! pipeline over real local storage, and the network clients against
//! mock HTTP servers.

pub mod config_validation_tests;
pub mod ledger_tests;
pub mod pinata_tests;
pub mod pipeline_tests;
