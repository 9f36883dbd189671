//! Configuration validation
//!
//! - `trait_def`: the `Validate` trait
//! - `validators`: implementations for every configuration section

mod trait_def;
mod validators;

pub use trait_def::Validate;
pub use validators::validate_http_url;
