//! Batch audit trail endpoints

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::IssuerError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use uuid::Uuid;

/// Configure batch routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/batches")
            .route("", web::get().to(list_batches))
            .route("/{id}", web::get().to(get_batch)),
    );
}

async fn list_batches(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let batches = state.services.records.batches.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(batches)))
}

async fn get_batch(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = Uuid::parse_str(&path)
        .map_err(|_| IssuerError::BadRequest(format!("Invalid batch id: {}", path)))?;
    let record = state
        .services
        .records
        .batches
        .get(&id.to_string())
        .await?
        .ok_or_else(|| IssuerError::NotFound(format!("Batch {}", id)))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}
