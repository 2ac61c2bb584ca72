// Application configuration loaded from environment variables.
// Decision: collaborator credentials are read once at startup and handed
// to explicitly constructed clients, never global state.

use anyhow::{Context, Result};

/// Cloudinary credentials; absent means image uploads are disabled
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    /// Allowed CORS origins; empty means same-origin only
    pub cors_origins: Vec<String>,
    pub stripe_secret_key: String,
    pub cloudinary: Option<CloudinaryConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL environment variable required")?;

        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let cors_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|s| parse_origins(&s))
            .unwrap_or_default();

        let stripe_secret_key = std::env::var("STRIPE_SECRET_KEY")
            .context("STRIPE_SECRET_KEY environment variable required")?;

        let cloudinary = match (
            std::env::var("CLOUDINARY_CLOUD_NAME"),
            std::env::var("CLOUDINARY_API_KEY"),
            std::env::var("CLOUDINARY_API_SECRET"),
        ) {
            (Ok(cloud_name), Ok(api_key), Ok(api_secret))
                if !cloud_name.is_empty() && !api_key.is_empty() && !api_secret.is_empty() =>
            {
                Some(CloudinaryConfig {
                    cloud_name,
                    api_key,
                    api_secret,
                })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            port,
            cors_origins,
            stripe_secret_key,
            cloudinary,
        })
    }
}

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
