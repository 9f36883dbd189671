//! Strict delimited-text parser for recipient files
//!
//! The parser never drops a row it cannot read: any malformed record aborts the
//! whole file. Only blank lines are skipped.

use std::collections::HashMap;
use thiserror::Error;

/// Column holding the participant's display name
pub const NAME_COLUMN: &str = "participant_name";
/// Column holding the participant's wallet address
pub const ADDRESS_COLUMN: &str = "wallet_address";
/// Columns every recipient file must carry
pub const REQUIRED_COLUMNS: [&str; 2] = [NAME_COLUMN, ADDRESS_COLUMN];

/// Structural problems with a recipient file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No header row
    #[error("file is empty or has no header row")]
    EmptyInput,

    /// Same column name twice (after trim + lowercase)
    #[error("duplicate column {0:?} in header")]
    DuplicateHeader(String),

    /// Required columns absent from the header
    #[error("missing required columns: {}", missing.join(", "))]
    MissingColumns {
        missing: Vec<String>,
        required: Vec<String>,
        found: Vec<String>,
    },

    /// Record with the wrong number of fields
    #[error("row {row} (line {line}): expected {expected} fields, found {found}")]
    FieldCount {
        row: usize,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Quoted field never closed
    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },

    /// Quote character in the middle of an unquoted field or after a closing quote
    #[error("line {line}: unexpected quote or character after quoted field")]
    UnexpectedQuote { line: usize },
}

/// One data record keyed by normalized header name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based ordinal among data records (header and blank lines excluded)
    pub row: usize,
    /// 1-based line where the record starts
    pub line: usize,
    /// Field values keyed by normalized header
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    /// Raw (untrimmed) value of a column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Parsed header plus data records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientTable {
    /// Normalized header names in file order
    pub headers: Vec<String>,
    /// Data records in file order
    pub records: Vec<RawRecord>,
}

impl RecipientTable {
    /// Fail unless every listed column is present
    pub fn require_columns(&self, required: &[&str]) -> Result<(), ParseError> {
        let missing: Vec<String> = required
            .iter()
            .filter(|column| !self.headers.iter().any(|h| h == *column))
            .map(|column| column.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ParseError::MissingColumns {
                missing,
                required: required.iter().map(|c| c.to_string()).collect(),
                found: self.headers.clone(),
            })
        }
    }
}

/// Parse a recipient file and check the required columns
pub fn parse_recipients(text: &str) -> Result<RecipientTable, ParseError> {
    let table = parse_table(text)?;
    table.require_columns(&REQUIRED_COLUMNS)?;
    Ok(table)
}

/// Parse comma-delimited text with a header row
///
/// Header names are trimmed and lowercased.
pub fn parse_table(text: &str) -> Result<RecipientTable, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = split_records(text)?.into_iter();

    let (_, header_fields) = records.next().ok_or(ParseError::EmptyInput)?;
    let mut headers: Vec<String> = Vec::with_capacity(header_fields.len());
    for name in header_fields {
        let normalized = name.trim().to_lowercase();
        if headers.contains(&normalized) {
            return Err(ParseError::DuplicateHeader(normalized));
        }
        headers.push(normalized);
    }

    let mut parsed = Vec::new();
    for (index, (line, fields)) in records.enumerate() {
        let row = index + 1;
        if fields.len() != headers.len() {
            return Err(ParseError::FieldCount {
                row,
                line,
                expected: headers.len(),
                found: fields.len(),
            });
        }

        parsed.push(RawRecord {
            row,
            line,
            fields: headers.iter().cloned().zip(fields).collect(),
        });
    }

    Ok(RecipientTable {
        headers,
        records: parsed,
    })
}

/// Split text into records of fields, tagging each with its starting line
fn split_records(text: &str) -> Result<Vec<(usize, Vec<String>)>, ParseError> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_quoted = false;
    let mut after_quote = false;
    let mut line = 1;
    let mut record_line = 1;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => {
                    in_quotes = false;
                    after_quote = true;
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            ',' => {
                fields.push(std::mem::take(&mut field));
                field_quoted = false;
                after_quote = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\r' | '\n' => {
                fields.push(std::mem::take(&mut field));
                let blank = fields.len() == 1 && !field_quoted && fields[0].trim().is_empty();
                if !blank {
                    records.push((record_line, std::mem::take(&mut fields)));
                }
                fields.clear();
                field_quoted = false;
                after_quote = false;
                line += 1;
                record_line = line;
            }
            '"' if !field_quoted && field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
                field_quoted = true;
            }
            '"' => return Err(ParseError::UnexpectedQuote { line }),
            ' ' | '\t' if after_quote => {}
            _ if after_quote => return Err(ParseError::UnexpectedQuote { line }),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(ParseError::UnterminatedQuote { line: record_line });
    }

    if !fields.is_empty() || field_quoted || !field.trim().is_empty() {
        fields.push(field);
        records.push((record_line, fields));
    }

    Ok(records)
}
