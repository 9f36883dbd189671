//! Deployment registry endpoints

use crate::core::recipients::Address;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::NewDeployment;
use crate::utils::error::IssuerError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::info;

/// Configure deployment registry routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contracts/deployments")
            .route("", web::get().to(list_deployments))
            .route("", web::post().to(register_deployment))
            .route("/{address}", web::get().to(get_deployment))
            .route("/{address}", web::delete().to(delete_deployment)),
    );
}

fn parse_address(raw: &str) -> Result<Address, IssuerError> {
    Address::parse(raw).map_err(|_| IssuerError::BadRequest(format!("Invalid contract address: {}", raw)))
}

async fn list_deployments(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let deployments = state.services.records.deployments.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(deployments)))
}

async fn register_deployment(
    state: web::Data<AppState>,
    body: web::Json<NewDeployment>,
) -> ActixResult<HttpResponse> {
    let record = body.into_inner().into_record(chrono::Utc::now())?;
    state
        .services
        .records
        .deployments
        .append(record.clone())
        .await?;

    info!(
        contract = %record.contract_address,
        network = %record.network,
        "Deployment registered"
    );
    Ok(HttpResponse::Created().json(
        ApiResponse::success(record).with_message("Deployment saved successfully"),
    ))
}

async fn get_deployment(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let address = parse_address(&path)?;
    let record = state
        .services
        .records
        .deployments
        .get(address.as_str())
        .await?
        .ok_or_else(|| IssuerError::NotFound(format!("Deployment {}", address)))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}

async fn delete_deployment(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let address = parse_address(&path)?;
    if !state
        .services
        .records
        .deployments
        .delete(address.as_str())
        .await?
    {
        return Err(IssuerError::NotFound(format!("Deployment {}", address)).into());
    }

    info!(contract = %address, "Deployment removed");
    Ok(HttpResponse::NoContent().finish())
}
