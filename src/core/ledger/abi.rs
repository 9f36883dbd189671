//! Minimal ABI encoding for the certificate contract

use crate::core::recipients::Address;
use crate::utils::error::{IssuerError, Result};

/// `mintCertificate(address,string)`
pub const MINT_CERTIFICATE_SELECTOR: &str = "0712249f";
/// `tokenIdCounter()`
pub const TOKEN_ID_COUNTER_SELECTOR: &str = "98bdf6f5";

const WORD: usize = 32;

/// Calldata for `tokenIdCounter()`
pub fn encode_token_counter_call() -> String {
    format!("0x{}", TOKEN_ID_COUNTER_SELECTOR)
}

/// Calldata for `mintCertificate(recipient, uri)`
pub fn encode_mint_call(recipient: &Address, uri: &str) -> String {
    let bytes = uri.as_bytes();
    let padded_len = bytes.len().div_ceil(WORD) * WORD;

    let mut data = String::with_capacity(2 + 8 + 64 * 3 + padded_len * 2);
    data.push_str("0x");
    data.push_str(MINT_CERTIFICATE_SELECTOR);
    data.push_str(&format!("{:0>64}", recipient.hex_digits()));
    // Head of the dynamic string: offset past the two head words.
    data.push_str(&format!("{:064x}", 2 * WORD));
    data.push_str(&format!("{:064x}", bytes.len()));

    let mut tail = bytes.to_vec();
    tail.resize(padded_len, 0);
    data.push_str(&hex::encode(tail));
    data
}

/// Decode a hex quantity such as `0x1a`
pub fn parse_quantity(value: &str) -> Result<u64> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| IssuerError::Ledger(format!("Expected hex quantity, got {:?}", value)))?;
    if digits.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(digits, 16)
        .map_err(|e| IssuerError::Ledger(format!("Invalid hex quantity {:?}: {}", value, e)))
}

/// Decode a single `uint256` return word that must fit in 64 bits
pub fn decode_uint_word(data: &str) -> Result<u64> {
    let digits = data.strip_prefix("0x").unwrap_or(data);
    if digits.len() != 64 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(IssuerError::Ledger(format!(
            "Expected one 32-byte word, got {} hex digits",
            digits.len()
        )));
    }

    let (high, low) = digits.split_at(48);
    if high.bytes().any(|b| b != b'0') {
        return Err(IssuerError::Ledger(
            "Counter value does not fit in 64 bits".to_string(),
        ));
    }
    u64::from_str_radix(low, 16)
        .map_err(|e| IssuerError::Ledger(format!("Invalid counter value: {}", e)))
}

/// Encode a quantity for a JSON-RPC parameter
pub fn to_quantity(value: u64) -> String {
    format!("0x{:x}", value)
}
