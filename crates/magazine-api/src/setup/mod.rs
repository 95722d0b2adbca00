//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from main.rs
//! for better organization and testability.

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use magazine_core::Config;
use magazine_processing::{UploadOptions, UploadOrchestrator};
use magazine_storage::{Storage, StorageUrlSigner};
use std::sync::Arc;
use std::time::Duration;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let storage = storage::setup_storage(&config).await?;
    let state = build_state(config.clone(), storage);
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}

/// Assemble application state around a storage backend
pub fn build_state(config: Config, storage: Arc<dyn Storage>) -> Arc<AppState> {
    let signer = Arc::new(StorageUrlSigner::new(
        storage.clone(),
        Duration::from_secs(config.signed_url_expiry_secs()),
    ));

    let uploads = UploadOrchestrator::new(storage.clone())
        .with_options(UploadOptions {
            max_concurrency: config.upload_max_concurrency(),
            rollback_on_failure: config.upload_rollback_on_failure(),
        })
        .push(
            UploadOrchestrator::config()
                .webp(true)
                .thumbnail(true)
                .folder(crate::constants::UPLOAD_FOLDER),
        );

    Arc::new(AppState {
        config,
        storage,
        signer,
        uploads,
    })
}
