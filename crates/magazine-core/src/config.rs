//! Configuration module
//!
//! This module provides configuration structures for the API service,
//! including server, storage and upload-pipeline settings.

use std::env;

use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 4000;
const MAX_MULTIPART_MEMORY: usize = 10 << 20; // 10 MB
const UPLOAD_MAX_CONCURRENCY: usize = 8;
const SIGNED_URL_EXPIRY_SECS: u64 = 60;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Requests served at once before callers queue
    pub http_concurrency_limit: usize,
}

/// API service configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base: BaseConfig,
    // Storage configuration
    pub storage_backend: Option<StorageBackend>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Upload pipeline configuration
    pub max_multipart_bytes: usize,
    pub upload_max_concurrency: usize,
    pub upload_rollback_on_failure: bool,
    pub signed_url_expiry_secs: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ApiConfig>);

impl Config {
    fn as_api(&self) -> &ApiConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.as_api().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = ApiConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_api().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_api().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_api().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_api().base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_api().base.http_concurrency_limit
    }

    pub fn storage_backend(&self) -> Option<StorageBackend> {
        self.as_api().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_api().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_api().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_api().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.as_api().aws_region.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_api().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.as_api().local_storage_base_url.as_deref()
    }

    pub fn max_multipart_bytes(&self) -> usize {
        self.as_api().max_multipart_bytes
    }

    pub fn upload_max_concurrency(&self) -> usize {
        self.as_api().upload_max_concurrency
    }

    pub fn upload_rollback_on_failure(&self) -> bool {
        self.as_api().upload_rollback_on_failure
    }

    pub fn signed_url_expiry_secs(&self) -> u64 {
        self.as_api().signed_url_expiry_secs
    }
}

fn is_production_env(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_env(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let storage_backend = match non_empty_var("STORAGE_BACKEND") {
            Some(value) => Some(value.parse::<StorageBackend>()?),
            None => None,
        };

        let base = BaseConfig {
            server_port: env::var("PORT")
                .or_else(|_| env::var("SERVER_PORT"))
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
        };

        let config = ApiConfig {
            base,
            storage_backend,
            s3_bucket: non_empty_var("S3_BUCKET").or_else(|| non_empty_var("AWS_S3_BUCKET_NAME")),
            s3_region: non_empty_var("S3_REGION"),
            s3_endpoint: non_empty_var("S3_ENDPOINT"),
            aws_region: non_empty_var("AWS_REGION"),
            local_storage_path: non_empty_var("LOCAL_STORAGE_PATH"),
            local_storage_base_url: non_empty_var("LOCAL_STORAGE_BASE_URL"),
            max_multipart_bytes: env::var("MAX_MULTIPART_MEMORY")
                .unwrap_or_else(|_| MAX_MULTIPART_MEMORY.to_string())
                .parse()
                .unwrap_or(MAX_MULTIPART_MEMORY),
            upload_max_concurrency: env::var("UPLOAD_MAX_CONCURRENCY")
                .unwrap_or_else(|_| UPLOAD_MAX_CONCURRENCY.to_string())
                .parse::<usize>()
                .unwrap_or(UPLOAD_MAX_CONCURRENCY)
                .max(1),
            upload_rollback_on_failure: env::var("UPLOAD_ROLLBACK_ON_FAILURE")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            signed_url_expiry_secs: env::var("SIGNED_URL_EXPIRY_SECS")
                .unwrap_or_else(|_| SIGNED_URL_EXPIRY_SECS.to_string())
                .parse()
                .unwrap_or(SIGNED_URL_EXPIRY_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_multipart_bytes == 0 {
            return Err(anyhow::anyhow!(
                "MAX_MULTIPART_MEMORY must be greater than zero"
            ));
        }

        let backend = self.storage_backend.unwrap_or(StorageBackend::S3);
        match backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
