//! Certificate validation and issuance endpoints

use crate::core::batch::{BatchOutcome, BatchReport};
use crate::core::recipients::{
    RECIPIENT_TEMPLATE_CSV, RECIPIENT_TEMPLATE_FILENAME, RecipientRow, ValidationReport,
};
use crate::server::routes::form::read_batch_form;
use crate::server::routes::{ApiResponse, health};
use crate::server::state::AppState;
use crate::utils::error::IssuerError;
use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use tracing::{error, info, warn};

/// Configure certificate routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/certificates")
            .route("/validate", web::post().to(validate_recipients))
            .route("/mint", web::post().to(mint_certificates))
            .route("/template", web::get().to(recipient_template))
            .route("/readiness", web::get().to(health::readiness)),
    );
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidatedFile {
    rows: Vec<RecipientRow>,
    row_count: usize,
    preview: Vec<RecipientRow>,
}

impl From<ValidationReport> for ValidatedFile {
    fn from(report: ValidationReport) -> Self {
        let preview = report.preview().to_vec();
        Self {
            row_count: report.valid_rows.len(),
            rows: report.valid_rows,
            preview,
        }
    }
}

/// Validate a recipient file without issuing anything
async fn validate_recipients(
    state: web::Data<AppState>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let form = read_batch_form(payload, state.max_upload_size()).await?;
    let csv = form
        .csv
        .filter(|csv| !csv.trim().is_empty())
        .ok_or_else(|| IssuerError::BadRequest("No CSV file provided".to_string()))?;

    let report = state.services.orchestrator.validate(&csv)?;
    if !report.is_valid() {
        return Err(IssuerError::RecipientsRejected(Box::new(report)).into());
    }

    Ok(HttpResponse::Ok().json(
        ApiResponse::success(ValidatedFile::from(report)).with_message("CSV validation successful"),
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MintResponse {
    outcome: BatchOutcome,
    #[serde(flatten)]
    report: BatchReport,
}

/// HTTP status for a completed batch
pub fn outcome_status(outcome: BatchOutcome) -> StatusCode {
    match outcome {
        BatchOutcome::FullSuccess => StatusCode::OK,
        BatchOutcome::PartialSuccess => StatusCode::MULTI_STATUS,
        BatchOutcome::FullFailure => StatusCode::BAD_GATEWAY,
    }
}

/// Validate the upload, then issue one certificate per recipient
async fn mint_certificates(
    state: web::Data<AppState>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let form = read_batch_form(payload, state.max_upload_size()).await?;
    let (request, csv) = form.into_request()?;

    info!(
        event = %request.event_name,
        contract = %request.contract_address,
        "Certificate batch requested"
    );
    let report = state
        .services
        .orchestrator
        .clone()
        .execute_detached(request, csv)
        .await
        .map_err(|e| {
            if e.is_structural() {
                warn!(error = %e, "Certificate batch refused");
            } else {
                error!(error = %e, "Certificate batch failed");
            }
            e
        })?;

    let outcome = report.outcome();
    let message = report.message();
    let body = ApiResponse {
        success: outcome != BatchOutcome::FullFailure,
        message: Some(message),
        data: Some(MintResponse { outcome, report }),
    };

    Ok(HttpResponse::build(outcome_status(outcome)).json(body))
}

/// Example recipient file
async fn recipient_template() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(
                RECIPIENT_TEMPLATE_FILENAME.to_string(),
            )],
        })
        .body(RECIPIENT_TEMPLATE_CSV)
}
