//! HTTP route modules

pub mod batches;
pub mod certificates;
pub mod content;
pub mod deployments;
pub mod form;
pub mod health;

use actix_web::web;

/// Standard success envelope
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Short human-readable summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Attach a summary line
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Register every route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(content::configure_routes)
        .service(
            web::scope("/api/v1")
                .configure(certificates::configure_routes)
                .configure(deployments::configure_routes)
                .configure(batches::configure_routes),
        );
}
