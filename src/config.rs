use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub api_host: String,
    pub api_port: u16,
    pub projects_per_page: u32,
    pub max_page_size: u32,
    pub image_hosting: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        if let Err(e) = dotenv::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }

        let config = Config {
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "nexus.db".to_string()),

            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid API_PORT")?,

            projects_per_page: env::var("PROJECTS_PER_PAGE")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .context("Invalid PROJECTS_PER_PAGE")?,

            max_page_size: env::var("MAX_PAGE_SIZE")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .context("Invalid MAX_PAGE_SIZE")?,

            image_hosting: ["CLOUDINARY_NAME", "CLOUDINARY_KEY", "CLOUDINARY_SECRET"]
                .iter()
                .all(|key| env::var(key).is_ok()),
        };

        Ok(config)
    }

    pub fn log_config(&self) {
        tracing::info!(
            database = %self.database_path,
            api = %self.api_address(),
            projects_per_page = self.projects_per_page,
            max_page_size = self.max_page_size,
            image_hosting = self.image_hosting,
            "Configuration loaded"
        );
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}
