use application::NexusApp;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod error;
mod extract;
mod routes;

use auth::JwtAuthProvider;
use config::Config;

#[derive(Clone)]
pub struct AppState {
    app: Arc<NexusApp>,
    auth: Arc<JwtAuthProvider>,
    projects_per_page: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("api_server=debug,tower_http=debug")),
        )
        .init();

    info!("Starting Project Nexus API server");

    // Load configuration from environment
    let config = Config::from_env()?;

    info!(database_path = %config.database_path, "Using database");
    info!(
        projects_per_page = config.projects_per_page,
        max_page_size = config.max_page_size,
        "Listing page sizes"
    );

    let app = NexusApp::new_with_config(
        &config.database_path,
        config.max_page_size,
        config.cloudinary.clone(),
    )?;
    let state = AppState {
        app: Arc::new(app),
        auth: Arc::new(JwtAuthProvider::new(&config.jwt_secret)),
        projects_per_page: config.projects_per_page,
    };

    let router = routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Run the server
    let bind_address = format!("{}:{}", config.api_host, config.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("API server listening on http://{}", bind_address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
