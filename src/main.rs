//! snowmap - an in-memory case-surveillance-to-choropleth API server
//!
//! This is the main entry point for the snowmap application.

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use snowmap::handlers::{
    choropleth_handler, heartbeat_handler, legend_handler, metadata_handler, table_handler,
};
use snowmap::{create_http_trace_layer, init_tracing, AppState, Config, Result, SnowmapError};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let (config, data_dir) = Config::load()?;

    // Validate configuration
    config.validate()?;

    init_tracing(&config.log_level);

    info!("Starting snowmap v{}", env!("CARGO_PKG_VERSION"));
    info!("Serving data from {}", data_dir.display());

    // Build the shared application state
    let state = AppState::new_shared(config.clone(), data_dir);

    // Check the data directory before accepting requests
    state.validate().map_err(|e| {
        error!("Invalid data directory: {}", e);
        e
    })?;

    // Build the router
    let app = Router::new()
        .route("/metadata", get(metadata_handler))
        .route("/choropleth", get(choropleth_handler))
        .route("/legend", get(legend_handler))
        .route("/table", get(table_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Create the server address
    let addr = SocketAddr::from((
        config
            .server
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| SnowmapError::Config {
                message: format!("Invalid host address: {}", e),
            })?,
        config.server.port,
    ));

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SnowmapError::Server {
            message: format!("Failed to bind to address: {}", e),
        })?;

    // Set up graceful shutdown
    let shutdown_future = shutdown_signal();

    info!("Server is ready to accept connections");

    // Start the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_future)
        .await
        .map_err(|e| SnowmapError::Server {
            message: format!("Server error: {}", e),
        })?;

    info!("Server has been gracefully shut down");
    Ok(())
}

/// Wait for a shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
