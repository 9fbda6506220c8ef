use crate::api::routes;
use crate::config::AppConfig;
use crate::db::Database;
use tracing::{error, info};

/// Starts and runs the HTTP server using Axum web framework
///
/// # Arguments
/// * `config` - Runtime configuration holding the bind address
/// * `database` - Connection pool shared by every request
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Ok once the server shut down gracefully, Error if it fails
pub async fn launch_server(
    config: &AppConfig,
    database: Database,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = routes::app(database);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
