//! Configuration module
//!
//! Environment-driven settings for the HTTP service, the storage backend and
//! the metadata database. `.env` is loaded first when present.

use std::env;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 4000;
const MAX_CONNECTIONS: u32 = 5;
const MAX_FILE_SIZE_MB: usize = 10;
const LOCAL_STORAGE_PATH: &str = "imgs";
const DATABASE_URL: &str = "sqlite://imgvault.db?mode=rwc";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub max_file_size_bytes: usize,
    // Metadata database (remote-backed variant)
    pub database_url: String,
    pub db_max_connections: u32,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
    pub cdn_public_host: Option<String>,
    pub local_storage_path: String,
    pub local_storage_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port: u16 = env::var("PORT")
            .unwrap_or_else(|_| SERVER_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::S3,
        };

        let config = Config {
            server_port,
            environment,
            cors_origins,
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| DATABASE_URL.to_string()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok().filter(|s| !s.is_empty()),
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok()
                .filter(|s| !s.is_empty()),
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
            cdn_public_host: env::var("CDN_PUBLIC_HOST").ok().filter(|s| !s.is_empty()),
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .unwrap_or_else(|_| LOCAL_STORAGE_PATH.to_string()),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").unwrap_or_else(|_| {
                format!("http://localhost:{}/api/v1/media", server_port)
            }),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
                if self.cdn_public_host.is_none() {
                    return Err(anyhow::anyhow!(
                        "CDN_PUBLIC_HOST must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Memory => {
                if self.cdn_public_host.is_none() {
                    return Err(anyhow::anyhow!(
                        "CDN_PUBLIC_HOST must be set when using memory storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.trim().is_empty() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must not be empty when using local storage backend"
                    ));
                }
            }
        }

        if self.storage_backend.uses_metadata_database()
            && !self.database_url.starts_with("sqlite:")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid SQLite connection string"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> Config {
        Config {
            server_port: 4000,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            max_file_size_bytes: 10 * 1024 * 1024,
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            storage_backend: StorageBackend::Memory,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            cdn_public_host: Some("cdn.example.com".to_string()),
            local_storage_path: "imgs".to_string(),
            local_storage_base_url: "http://localhost:4000/api/v1/media".to_string(),
        }
    }

    #[test]
    fn test_memory_config_is_valid() {
        assert!(memory_config().validate().is_ok());
    }

    #[test]
    fn test_s3_requires_bucket_and_region() {
        let mut config = memory_config();
        config.storage_backend = StorageBackend::S3;
        assert!(config.validate().is_err());

        config.s3_bucket = Some("images".to_string());
        assert!(config.validate().is_err());

        config.s3_region = Some("eu-west-1".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_remote_requires_public_host() {
        let mut config = memory_config();
        config.cdn_public_host = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_sqlite_database() {
        let mut config = memory_config();
        config.database_url = "postgresql://localhost/images".to_string();
        assert!(config.validate().is_err());

        // The local variant has no metadata database.
        config.storage_backend = StorageBackend::Local;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let mut config = memory_config();
        config.environment = "production".to_string();
        assert!(config.is_production());
        assert!(config.validate().is_err());

        config.cors_origins = vec!["https://app.example.com".to_string()];
        assert!(config.validate().is_ok());
    }
}
