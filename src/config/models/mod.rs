//! Configuration data models
//!
//! This module defines all configuration structures used throughout the issuer.

pub mod content_store;
pub mod issuer;
pub mod ledger;
pub mod logging;
pub mod metadata;
pub mod pacing;
pub mod server;
pub mod storage;

pub use content_store::*;
pub use issuer::*;
pub use ledger::*;
pub use logging::*;
pub use metadata::*;
pub use pacing::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum upload size in bytes
pub fn default_max_upload_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

pub fn default_true() -> bool {
    true
}

pub fn default_cors_max_age() -> usize {
    3600
}

pub fn default_pinata_api_url() -> String {
    "https://api.pinata.cloud".to_string()
}

pub fn default_pinata_gateway() -> String {
    "gateway.pinata.cloud".to_string()
}

/// Default upload timeout in seconds
pub fn default_upload_timeout() -> u64 {
    60
}

pub fn default_content_path() -> String {
    "./data/content".to_string()
}

pub fn default_public_base_url() -> String {
    "http://localhost:8000/content".to_string()
}

pub fn default_rpc_url() -> String {
    "http://localhost:8545".to_string()
}

/// Default receipt wait in seconds
pub fn default_confirmation_timeout() -> u64 {
    120
}

pub fn default_poll_interval_ms() -> u64 {
    1000
}

pub fn default_pacing_interval_ms() -> u64 {
    1000
}

pub fn default_burst() -> u32 {
    1
}

pub fn default_verify_base_url() -> String {
    "http://localhost:3000".to_string()
}

pub fn default_certificate_type() -> String {
    "Participation".to_string()
}

pub fn default_data_dir() -> String {
    "./data".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}
