//! HTTP server core

use crate::config::{Config, ServerConfig};
use crate::server::routes;
use crate::server::state::AppState;
use crate::services::IssuerServices;
use crate::utils::error::{IssuerError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, http::Method, middleware::DefaultHeaders, web};
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    /// Build every issuer component and wrap it in a server
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");
        let services = IssuerServices::from_config(config).await?;
        Ok(Self::with_services(config.clone(), services))
    }

    /// Server around already-built services
    pub fn with_services(config: Config, services: IssuerServices) -> Self {
        Self {
            config: config.server().clone(),
            state: AppState::new(config, services),
        }
    }

    /// Create the actix-web application
    pub(crate) fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors = Self::cors(&state.config().server().cors);

        App::new()
            .app_data(state)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "certmint")))
            .configure(routes::configure_routes)
    }

    fn cors(config: &crate::config::CorsConfig) -> Cors {
        let mut cors = Cors::default();
        if !config.enabled {
            return cors;
        }

        if config.allows_all_origins() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        cors.allowed_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_any_header()
            .max_age(config.max_age)
    }

    /// Start the HTTP server and run until shutdown
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        server
            .bind(&bind_addr)
            .map_err(|e| IssuerError::Config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run()
            .await
            .map_err(|e| IssuerError::Internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
