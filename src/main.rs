mod config;

use application::NexusApp;
use config::Config;
use domain::ProjectFilter;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("project_nexus=info,infrastructure=info,application=info")),
        )
        .init();

    info!("Project Nexus store bootstrap");

    // Load configuration from environment variables
    let config = Config::from_env()?;
    config.log_config();

    // Opening the app creates the database file and applies the schema
    let app = NexusApp::new_with_config(&config.database_path, config.max_page_size, None)?;

    let projects = app
        .project_query_service
        .list(1, 1, ProjectFilter::All)
        .await?
        .total_count;
    let users = app.user_service.count_users().await?;

    info!(projects, users, "Store ready");
    info!("Serve it with the api-server binary at http://{}", config.api_address());

    Ok(())
}
