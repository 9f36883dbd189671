//! Common test utilities for certmint
//!
//! - Fixtures for recipient files, requests and configuration
//! - `ScriptedLedger`, an in-memory ledger with scripted failures

pub mod fakes;
pub mod fixtures;

pub use fakes::{MintCall, ScriptedLedger};
pub use fixtures::{LocalHarness, address, csv_for, numbered_recipients};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
