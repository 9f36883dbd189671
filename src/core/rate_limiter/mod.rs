//! Submission pacing
//!
//! Spaces mint submissions out so the signing account and the ledger node are
//! not flooded.

mod limiter;
mod strategies;
mod types;


pub use limiter::RateLimiter;
pub use types::PacingPermit;
