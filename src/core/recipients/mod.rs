//! Recipient list parsing and validation
//!
//! Turns an uploaded recipient file into validated rows, or a report explaining
//! why the file was rejected.

mod parser;
mod types;
mod validator;


pub use parser::{
    ADDRESS_COLUMN, NAME_COLUMN, ParseError, REQUIRED_COLUMNS, RawRecord, RecipientTable,
    parse_recipients, parse_table,
};
pub use types::{
    Address, InvalidAddress, PREVIEW_ROWS, RECIPIENT_TEMPLATE_CSV, RECIPIENT_TEMPLATE_FILENAME,
    RecipientRow, RowCounts, ValidationReport,
};
pub use validator::{validate_csv, validate_records};
