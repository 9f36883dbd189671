//! HTTP server
//!
//! Exposes validation, minting, the deployment registry, the batch audit trail
//! and locally stored content over actix-web.

pub mod builder;
pub mod routes;
pub mod server;
pub mod state;


pub use builder::serve;
pub use server::HttpServer;
pub use state::AppState;
