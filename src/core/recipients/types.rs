//! Recipient types and data structures

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static ADDRESS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("address pattern compiles"));

/// 20-byte hex account address, normalized to lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse an address, trimming surrounding whitespace
    pub fn parse(value: &str) -> Result<Self, InvalidAddress> {
        let trimmed = value.trim();
        if ADDRESS_PATTERN.is_match(trimmed) {
            Ok(Self(trimmed.to_ascii_lowercase()))
        } else {
            Err(InvalidAddress(trimmed.to_string()))
        }
    }

    /// Check the address format without allocating
    pub fn is_valid(value: &str) -> bool {
        ADDRESS_PATTERN.is_match(value.trim())
    }

    /// Lowercase `0x`-prefixed form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digits without the `0x` prefix
    pub fn hex_digits(&self) -> &str {
        &self.0[2..]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = InvalidAddress;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

/// Address that failed the `0x` + 40 hex digit check
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid address: {0:?}")]
pub struct InvalidAddress(pub String);

/// One accepted recipient line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientRow {
    /// Participant name, trimmed and non-empty
    pub name: String,
    /// Normalized wallet address
    pub wallet_address: Address,
}

/// Row tallies for a submitted file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCounts {
    /// Data rows in the file (empty lines excluded)
    pub total: usize,
    /// Rows that passed the per-row checks
    pub valid: usize,
}

/// Number of rows echoed back before minting
pub const PREVIEW_ROWS: usize = 5;

/// Outcome of validating one recipient file
///
/// A report with any error rejects the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Rows that passed the per-row checks, in file order
    pub valid_rows: Vec<RecipientRow>,
    /// One entry per offending row or cross-row rule
    pub errors: Vec<String>,
    /// Row tallies
    pub row_counts: RowCounts,
}

impl ValidationReport {
    /// Whether the file may proceed to minting
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// First few accepted rows for caller feedback
    pub fn preview(&self) -> &[RecipientRow] {
        let end = self.valid_rows.len().min(PREVIEW_ROWS);
        &self.valid_rows[..end]
    }
}

/// Downloadable example recipient file
pub const RECIPIENT_TEMPLATE_CSV: &str = "participant_name,wallet_address\n\
John Doe,0x1234567890123456789012345678901234567890\n\
Jane Smith,0x0987654321098765432109876543210987654321\n";

/// Suggested filename for the template download
pub const RECIPIENT_TEMPLATE_FILENAME: &str = "certificate_template.csv";
