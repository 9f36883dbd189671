//! Serves files held by the local content store

use crate::server::state::AppState;
use crate::utils::error::IssuerError;
use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::debug;

/// Configure content routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/content/{id}", web::get().to(get_content));
}

async fn get_content(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let content_id = path.into_inner();
    let store = state
        .services
        .local_content
        .as_ref()
        .ok_or_else(|| IssuerError::NotFound(format!("Content not found: {}", content_id)))?;

    let bytes = store.get(&content_id).await?;
    let content_type = match store.metadata(&content_id).await {
        Ok(metadata) => metadata.content_type,
        Err(e) => {
            debug!(content_id = %content_id, error = %e, "Serving content without metadata");
            "application/octet-stream".to_string()
        }
    };

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header(CacheControl(vec![
            CacheDirective::Public,
            CacheDirective::MaxAge(31_536_000),
            CacheDirective::Extension("immutable".to_string(), None),
        ]))
        .body(bytes))
}
