use anyhow::{bail, Context, Result};
use infrastructure::{CloudinaryConfig, DEFAULT_CLOUDINARY_API};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub api_host: String,
    pub api_port: u16,
    pub projects_per_page: u32,
    pub max_page_size: u32,
    pub jwt_secret: String,
    pub cloudinary: Option<CloudinaryConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let config = Config {
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "nexus.db".to_string()),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: parsed("API_PORT", 8080)?,
            projects_per_page: parsed("PROJECTS_PER_PAGE", 8)?,
            max_page_size: parsed("MAX_PAGE_SIZE", 50)?,
            jwt_secret: env::var("AUTH_JWT_SECRET")
                .context("AUTH_JWT_SECRET must be set to verify session tokens")?,
            cloudinary: cloudinary_from_env()?,
        };

        if config.jwt_secret.trim().is_empty() {
            bail!("AUTH_JWT_SECRET must not be empty");
        }
        if config.projects_per_page == 0 || config.projects_per_page > config.max_page_size {
            bail!(
                "PROJECTS_PER_PAGE must be between 1 and MAX_PAGE_SIZE ({})",
                config.max_page_size
            );
        }
        Ok(config)
    }
}

fn parsed<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

fn cloudinary_from_env() -> Result<Option<CloudinaryConfig>> {
    let name = env::var("CLOUDINARY_NAME").ok();
    let key = env::var("CLOUDINARY_KEY").ok();
    let secret = env::var("CLOUDINARY_SECRET").ok();

    match (name, key, secret) {
        (Some(cloud_name), Some(api_key), Some(api_secret)) => Ok(Some(CloudinaryConfig {
            cloud_name,
            api_key,
            api_secret,
            api_base_url: env::var("CLOUDINARY_API_URL")
                .unwrap_or_else(|_| DEFAULT_CLOUDINARY_API.to_string()),
        })),
        (None, None, None) => Ok(None),
        _ => bail!("CLOUDINARY_NAME, CLOUDINARY_KEY and CLOUDINARY_SECRET must be set together"),
    }
}
