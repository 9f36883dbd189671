//! # certmint
//!
//! Bulk issuance of verifiable certificate tokens from a recipient spreadsheet.
//!
//! A batch takes a recipient file, validates every row before anything leaves
//! the process, then for each recipient stores a metadata document in a
//! content-addressed store and mints a certificate token that points at it.
//! The result is a per-recipient report: which certificates exist, which do
//! not, and why.
//!
//! ## Library use
//!
//! ```rust,no_run
//! use certmint::{BatchRequest, Config, IssuerServices};
//! use certmint::core::recipients::Address;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/certmint.yaml").await?;
//!     let services = IssuerServices::from_config(&config).await?;
//!
//!     let request = BatchRequest::new(
//!         "RustConf 2026",
//!         "Speaker",
//!         Address::parse("0x1234567890123456789012345678901234567890")?,
//!     );
//!     let csv = std::fs::read_to_string("recipients.csv")?;
//!     let report = services.orchestrator.execute(&request, &csv).await?;
//!
//!     println!("{}", report.message());
//!     Ok(())
//! }
//! ```
//!
//! ## Server mode
//!
//! ```rust,no_run
//! use certmint::{Config, server::HttpServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/certmint.yaml").await?;
//!     HttpServer::new(&config).await?.start().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use core::batch::{BatchOrchestrator, BatchOutcome, BatchReport, BatchRequest, MintOutcome};
pub use core::recipients::{ValidationReport, validate_csv};
pub use services::IssuerServices;
pub use utils::error::{IssuerError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Unix time of the build
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("CERTMINT_BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("CERTMINT_GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("CERTMINT_RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

/// Build information of this binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
