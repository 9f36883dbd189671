//! Server startup

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use tracing::info;

/// Run the server with a loaded configuration
pub async fn serve(config: Config) -> Result<()> {
    let server = HttpServer::new(&config).await?;
    info!(
        address = %config.server().address(),
        backend = ?config.content_store().backend,
        "Certificate issuer ready"
    );
    info!("   POST /api/v1/certificates/validate - Validate a recipient file");
    info!("   POST /api/v1/certificates/mint - Issue a certificate batch");
    info!("   GET  /api/v1/batches - Batch audit trail");

    server.start().await
}
