//! Error handling for the issuer
//!
//! This module defines all error types used throughout the issuance pipeline.

use crate::core::recipients::{ParseError, ValidationReport};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the issuer
pub type Result<T> = std::result::Result<T, IssuerError>;

/// Main error type for the issuer
#[derive(Error, Debug)]
pub enum IssuerError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed recipient file
    #[error("CSV parsing failed: {0}")]
    Parse(#[from] ParseError),

    /// One or more recipient rows failed validation
    #[error("CSV validation failed with {} error(s)", .0.errors.len())]
    RecipientsRejected(Box<ValidationReport>),

    /// Missing or malformed batch parameters
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Content store upload or lookup failures
    #[error("Content store error: {0}")]
    ContentStore(String),

    /// Ledger contract failures (reverts, malformed responses)
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// JSON-RPC error objects returned by the node
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// External service unreachable
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Record store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict errors
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IssuerError {
    /// Whether this error happened before any recipient work was attempted
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            IssuerError::Config(_)
                | IssuerError::Parse(_)
                | IssuerError::BadRequest(_)
                | IssuerError::RecipientsRejected(_)
                | IssuerError::Unavailable(_)
        )
    }

    /// Map a reqwest failure, keeping timeouts distinct
    pub fn from_http(context: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            IssuerError::Timeout(format!("{}: {}", context, err))
        } else if err.is_connect() {
            IssuerError::Unavailable(format!("{}: {}", context, err))
        } else {
            IssuerError::HttpClient(err)
        }
    }

    fn status_and_code(&self) -> (actix_web::http::StatusCode, &'static str) {
        use actix_web::http::StatusCode;

        match self {
            IssuerError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            IssuerError::HttpClient(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            IssuerError::Serialization(_) | IssuerError::Yaml(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZATION_ERROR")
            }
            IssuerError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            IssuerError::Parse(_) => (StatusCode::BAD_REQUEST, "CSV_PARSE_ERROR"),
            IssuerError::RecipientsRejected(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            IssuerError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            IssuerError::ContentStore(_) => (StatusCode::BAD_GATEWAY, "CONTENT_STORE_ERROR"),
            IssuerError::Ledger(_) | IssuerError::Rpc { .. } => {
                (StatusCode::BAD_GATEWAY, "LEDGER_ERROR")
            }
            IssuerError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
            IssuerError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            IssuerError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            IssuerError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            IssuerError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            IssuerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl ResponseError for IssuerError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();

        let mut body = serde_json::json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": self.to_string(),
            }
        });

        match self {
            IssuerError::RecipientsRejected(report) => {
                body["error"]["details"] = serde_json::json!({
                    "errors": report.errors,
                    "validRowCount": report.row_counts.valid,
                    "totalRowCount": report.row_counts.total,
                });
            }
            IssuerError::Parse(ParseError::MissingColumns {
                missing,
                required,
                found,
            }) => {
                body["error"]["details"] = serde_json::json!({
                    "missingColumns": missing,
                    "requiredColumns": required,
                    "foundColumns": found,
                });
            }
            _ => {}
        }

        HttpResponse::build(status_code).json(body)
    }
}
