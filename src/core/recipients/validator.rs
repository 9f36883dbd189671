//! Recipient validation
//!
//! Validation is side-effect free and fail-closed: a single bad row rejects the
//! whole file so nobody is skipped without the caller noticing.

use super::parser::{ADDRESS_COLUMN, NAME_COLUMN, ParseError, RawRecord, parse_recipients};
use super::types::{Address, RecipientRow, RowCounts, ValidationReport};
use std::collections::HashSet;
use tracing::debug;

/// Parse and validate a recipient file
///
/// Structural problems come back as `Err`; row problems are listed in the report.
pub fn validate_csv(text: &str) -> Result<ValidationReport, ParseError> {
    let table = parse_recipients(text)?;
    Ok(validate_records(&table.records))
}

/// Validate parsed records
pub fn validate_records(records: &[RawRecord]) -> ValidationReport {
    let mut errors = Vec::new();
    let mut valid_rows = Vec::with_capacity(records.len());

    for record in records {
        let mut row_errors = Vec::new();

        let name = record.get(NAME_COLUMN).map(str::trim).unwrap_or_default();
        if name.is_empty() {
            row_errors.push(format!("Row {}: {} is required", record.row, NAME_COLUMN));
        }

        let raw_address = record.get(ADDRESS_COLUMN).map(str::trim).unwrap_or_default();
        let address = if raw_address.is_empty() {
            row_errors.push(format!("Row {}: {} is required", record.row, ADDRESS_COLUMN));
            None
        } else {
            match Address::parse(raw_address) {
                Ok(address) => Some(address),
                Err(_) => {
                    row_errors.push(format!(
                        "Row {}: {} format is invalid",
                        record.row, ADDRESS_COLUMN
                    ));
                    None
                }
            }
        };

        match address {
            Some(wallet_address) if row_errors.is_empty() => valid_rows.push(RecipientRow {
                name: name.to_string(),
                wallet_address,
            }),
            _ => errors.append(&mut row_errors),
        }
    }

    let duplicates = duplicate_addresses(&valid_rows);
    if !duplicates.is_empty() {
        let listed: Vec<&str> = duplicates.iter().map(Address::as_str).collect();
        errors.push(format!(
            "Duplicate wallet addresses found: {}",
            listed.join(", ")
        ));
    }

    if records.is_empty() {
        errors.push("No participant rows found".to_string());
    }

    let row_counts = RowCounts {
        total: records.len(),
        valid: valid_rows.len(),
    };

    debug!(
        total = row_counts.total,
        valid = row_counts.valid,
        errors = errors.len(),
        "Recipient validation finished"
    );

    ValidationReport {
        valid_rows,
        errors,
        row_counts,
    }
}

/// Addresses seen more than once, each listed once in order of first repeat
fn duplicate_addresses(rows: &[RecipientRow]) -> Vec<Address> {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut duplicates: Vec<Address> = Vec::new();

    for row in rows {
        if !seen.insert(&row.wallet_address) && !duplicates.contains(&row.wallet_address) {
            duplicates.push(row.wallet_address.clone());
        }
    }

    duplicates
}
