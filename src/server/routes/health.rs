//! Health and readiness endpoints

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use tracing::{debug, warn};

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: &'static str,
    build: crate::BuildInfo,
}

/// Liveness: the process is up
pub async fn health_check() -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    Ok(HttpResponse::Ok().json(ApiResponse::success(HealthStatus {
        status: "healthy",
        timestamp: chrono::Utc::now(),
        version: crate::VERSION,
        build: crate::build_info(),
    })))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComponentStatus {
    ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Readiness {
    ready: bool,
    content_store: ComponentStatus,
    ledger: ComponentStatus,
}

/// Readiness: the content store and the ledger node both answer
pub async fn readiness(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let services = &state.services;

    let content_store = match services.content_store.health_check().await {
        Ok(()) => ComponentStatus {
            ready: true,
            detail: Some(services.content_store.backend().to_string()),
        },
        Err(e) => {
            warn!(error = %e, "Content store not ready");
            ComponentStatus {
                ready: false,
                detail: Some(e.to_string()),
            }
        }
    };

    let ledger = match services.ledger.health_check().await {
        Ok(block) => ComponentStatus {
            ready: true,
            detail: Some(format!("block {}", block)),
        },
        Err(e) => {
            warn!(error = %e, "Ledger not ready");
            ComponentStatus {
                ready: false,
                detail: Some(e.to_string()),
            }
        }
    };

    let readiness = Readiness {
        ready: content_store.ready && ledger.ready,
        content_store,
        ledger,
    };

    let mut response = if readiness.ready {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    Ok(response.json(ApiResponse::success(readiness)))
}
